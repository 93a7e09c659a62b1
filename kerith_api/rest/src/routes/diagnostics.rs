use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use kerith_core_diagnostics_contracts::{DiagnosticsService, EmailCheck, EmailReport};
use kerith_email_contracts::EmailProvider;

use crate::models::diagnostics::{ApiConfiguredSettings, ApiEmailReport};

pub fn router(service: Arc<impl DiagnosticsService>) -> Router<()> {
    Router::new()
        .route("/api/email/test-config", routing::get(test_config))
        .with_state(service)
}

async fn test_config(service: State<Arc<impl DiagnosticsService>>) -> Response {
    let EmailReport { configured, check } = service.email_report().await;
    let configured = ApiConfiguredSettings(configured);
    let provider = check.provider().map(EmailProvider::name);

    let (status, report) = match check {
        EmailCheck::NoTransport => (
            StatusCode::BAD_REQUEST,
            ApiEmailReport {
                success: false,
                error: Some("Missing email configuration".into()),
                message: "Please configure either Mailjet (MAILJET_API_KEY, MAILJET_SECRET_KEY) \
                          or SMTP (SMTP_HOST, SMTP_USER, SMTP_PASSWORD)."
                    .into(),
                provider,
                missing: None,
                error_details: None,
                configured,
                tip: None,
            },
        ),
        EmailCheck::MissingSettings { missing, .. } => (
            StatusCode::BAD_REQUEST,
            ApiEmailReport {
                success: false,
                error: Some("Missing required environment variables".into()),
                message: format!("Please configure the following: {}", missing.join(", ")),
                provider,
                missing: Some(missing),
                error_details: None,
                configured,
                tip: None,
            },
        ),
        EmailCheck::Unreachable {
            provider: active,
            error,
        } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiEmailReport {
                success: false,
                error: Some(format!("{active} connection failed")),
                message: match active {
                    EmailProvider::Mailjet => format!("Could not connect to Mailjet. {error}"),
                    EmailProvider::Smtp => format!("Could not connect to SMTP server. {error}"),
                },
                provider,
                missing: None,
                error_details: Some(error),
                configured,
                tip: Some(match active {
                    EmailProvider::Mailjet => {
                        "Make sure: 1) Your API keys are correct, 2) The email in SMTP_FROM_EMAIL \
                         is verified in Mailjet, 3) Your Mailjet account is active"
                    }
                    EmailProvider::Smtp => "Check your SMTP server settings and credentials",
                }),
            },
        ),
        EmailCheck::Ok { provider: active } => (
            StatusCode::OK,
            ApiEmailReport {
                success: true,
                error: None,
                message: format!("{active} configuration is valid and connection successful!"),
                provider,
                missing: None,
                error_details: None,
                configured,
                tip: None,
            },
        ),
    };

    (status, Json(report)).into_response()
}
