use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use kerith_core_inquiry_contracts::{InquiryService, InquirySendError};
use kerith_email_contracts::EmailSendError;
use tracing::error;

use crate::{
    errors::{self, internal_server_error, validation_error},
    extractors::json::ApiJson,
    models::{
        inquiry::{ApiAppointmentRequest, ApiContactRequest},
        ApiSuccess,
    },
};

pub fn router(service: Arc<impl InquiryService>) -> Router<()> {
    Router::new()
        .route("/api/email/contact", routing::post(send_contact))
        .route("/api/email/appointment", routing::post(send_appointment))
        .with_state(service)
}

async fn send_contact(
    service: State<Arc<impl InquiryService>>,
    ApiJson(request): ApiJson<ApiContactRequest>,
) -> Response {
    match service.send_contact(request.into()).await {
        Ok(()) => sent(),
        Err(err) => send_error(err),
    }
}

async fn send_appointment(
    service: State<Arc<impl InquiryService>>,
    ApiJson(request): ApiJson<ApiAppointmentRequest>,
) -> Response {
    match service.send_appointment(request.into()).await {
        Ok(()) => sent(),
        Err(err) => send_error(err),
    }
}

fn sent() -> Response {
    Json(ApiSuccess::new("Email sent successfully")).into_response()
}

fn send_error(err: InquirySendError) -> Response {
    match err {
        InquirySendError::MissingFields(_) => {
            errors::error(StatusCode::BAD_REQUEST, "Missing required fields")
        }
        InquirySendError::Invalid(invalid) => validation_error(&invalid),
        InquirySendError::Send(EmailSendError::NotConfigured) => {
            error!("Email delivery is not configured");
            errors::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                EmailSendError::NotConfigured.to_string(),
            )
        }
        InquirySendError::Send(EmailSendError::Rejected(detail)) => {
            error!("Email was rejected: {detail}");
            errors::error(StatusCode::INTERNAL_SERVER_ERROR, detail)
        }
        InquirySendError::Send(EmailSendError::Transport(err)) => {
            error!("Failed to send email: {err:#}");
            errors::error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        InquirySendError::Other(err) => internal_server_error(err),
    }
}
