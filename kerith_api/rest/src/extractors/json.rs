use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::error;

pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

/// Like [`Json`], but rejects malformed bodies with the regular error
/// response.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!("rejected request body: {}", rejection.body_text());
                Err(error(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY))
            }
        }
    }
}
