use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kerith_models::validate::ValidationErrors;
use serde::Serialize;

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

pub fn error(code: StatusCode, error: impl Into<String>) -> Response {
    (
        code,
        Json(ApiError {
            success: false,
            error: error.into(),
            field_errors: None,
        }),
    )
        .into_response()
}

/// Responds with the first validation message and the message of every
/// invalid field.
pub fn validation_error(errors: &ValidationErrors) -> Response {
    let field_errors = errors
        .iter()
        .map(|(field, message)| (field.as_str(), message.to_owned()))
        .collect::<BTreeMap<_, _>>();

    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            success: false,
            error: errors.to_string(),
            field_errors: Some(field_errors),
        }),
    )
        .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<&'static str, String>>,
}
