use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use super::{plain_text_error, AppError, ErrorCode};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    plain_text_error(StatusCode::NOT_FOUND, ErrorCode::NotFound.default_message())
}

/// Handler for 405 Method Not Allowed errors.
///
/// Attach it with `MethodRouter::fallback` so unsupported verbs on a known
/// path get a body naming the rejected method.
pub async fn method_not_allowed(method: Method) -> Response {
    AppError::MethodNotAllowed(method).into_response()
}
