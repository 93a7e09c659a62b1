use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use kerith_core_diagnostics_contracts::{DiagnosticsService, HealthStatus};

use crate::models::diagnostics::ApiHealth;

pub fn router(service: Arc<impl DiagnosticsService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

async fn health(service: State<Arc<impl DiagnosticsService>>) -> Response {
    let HealthStatus { email } = service.health().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(ApiHealth { http: true, email })).into_response()
}
