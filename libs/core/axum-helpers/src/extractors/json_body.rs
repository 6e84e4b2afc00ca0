//! JSON body extractor that ignores the request `Content-Type`.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON extractor that decodes the body regardless of `Content-Type`.
///
/// `axum::Json` answers a missing `application/json` header with 415 and a
/// shape mismatch with 422. Clients of this API send bare `curl -d` bodies,
/// so the body is decoded as JSON unconditionally and every decode failure is
/// a 400 with a plain-text reason.
///
/// # Example
/// ```ignore
/// use axum::routing::post;
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<serde_json::Value>) -> String {
///     payload.to_string()
/// }
///
/// let app = axum::Router::new().route("/things", post(create));
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::from(e).into_response())
    }
}
