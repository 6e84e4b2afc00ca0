//! Type-safe error codes for structured logging.
//!
//! Every error response is logged with an `error_code` field. Each code has:
//! - String representation (e.g., "NOT_ACCEPTABLE")
//! - Integer code for log queries and alerts (e.g., 1012)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotAcceptable;
//! assert_eq!(code.as_str(), "NOT_ACCEPTABLE");
//! assert_eq!(code.code(), 1012);
//! ```

use serde::{Deserialize, Serialize};

/// Standardized error codes for API failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request is malformed (bad path, bad query value, bad identifier)
    BadRequest,

    /// Request body could not be read
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request body is not valid JSON for the expected shape
    InvalidJson,

    /// HTTP method is not supported on this path
    MethodNotAllowed,

    /// Request conflicts with stored data and cannot be accepted
    NotAcceptable,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidJson => "INVALID_JSON",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::NotAcceptable => "NOT_ACCEPTABLE",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Integer code for logging and monitoring.
    ///
    /// - 1000-1999: Client errors
    pub fn code(&self) -> i32 {
        match self {
            Self::BadRequest => 1000,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::InvalidJson => 1010,
            Self::MethodNotAllowed => 1011,
            Self::NotAcceptable => 1012,
        }
    }

    /// Default user-facing message, used when a variant carries no text of its own.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::JsonExtraction => "Failed to read request body",
            Self::NotFound => "404 page not found",
            Self::InvalidJson => "Invalid JSON format",
            Self::MethodNotAllowed => "Method not allowed",
            Self::NotAcceptable => "Request not acceptable",
            Self::InternalError => "An internal server error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
