pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    extract::rejection::BytesRejection,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Content type of every error body.
pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Builds a plain-text error response.
///
/// The body is the message followed by a newline, the format HTTP clients of
/// the pantry API already parse.
pub fn plain_text_error(status: StatusCode, message: impl AsRef<str>) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, PLAIN_TEXT),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        format!("{}\n", message.as_ref()),
    )
        .into_response()
}

/// Application error type that can be converted to HTTP responses.
///
/// Every variant renders as a plain-text body with the matching status code
/// and is logged with a stable `error_code` field.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Body extraction error: {0}")]
    BodyRejection(#[from] BytesRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Not Acceptable: {0}")]
    NotAcceptable(String),

    #[error("Method Not Allowed: {0}")]
    MethodNotAllowed(Method),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SerdeJson(_) => StatusCode::BAD_REQUEST,
            AppError::BodyRejection(e) => e.status(),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotAcceptable(_) => StatusCode::NOT_ACCEPTABLE,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::SerdeJson(_) => ErrorCode::InvalidJson,
            AppError::BodyRejection(_) => ErrorCode::JsonExtraction,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::NotAcceptable(_) => ErrorCode::NotAcceptable,
            AppError::MethodNotAllowed(_) => ErrorCode::MethodNotAllowed,
            AppError::InternalServerError(_) => ErrorCode::InternalError,
        }
    }

    /// Text written to the response body.
    pub fn message(&self) -> String {
        match self {
            AppError::SerdeJson(e) => format!("{}: {}", ErrorCode::InvalidJson.default_message(), e),
            AppError::BodyRejection(e) => e.body_text(),
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::NotAcceptable(msg)
            | AppError::InternalServerError(msg) => msg.clone(),
            AppError::MethodNotAllowed(method) => format!("Invalid request method {}", method),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.message();

        match &self {
            AppError::InternalServerError(_) => {
                tracing::error!(error_code = code.code(), "Internal server error: {}", message);
            }
            AppError::SerdeJson(_) | AppError::BodyRejection(_) => {
                tracing::warn!(error_code = code.code(), "Rejected request body: {}", message);
            }
            _ => {
                tracing::info!(error_code = code.code(), status = %status, "{}", message);
            }
        }

        plain_text_error(status, message)
    }
}
