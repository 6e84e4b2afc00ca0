use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PantryError {
    /// Request path has fewer than three `/`-separated segments
    #[error("invalid Path")]
    MalformedPath,

    /// Third path segment is not an integer
    #[error("unexpected Pantry Item Id data type. Expecting integer")]
    InvalidIdentifier(String),

    #[error("Pantry Item Id not found")]
    NotFound(i64),

    #[error("Duplicate item {0} found")]
    DuplicateName(String),

    #[error("Query Parameter {param} has an invalid value. Expected Value is true or false")]
    InvalidQueryValue { param: &'static str },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type PantryResult<T> = Result<T, PantryError>;

impl PantryError {
    /// Error for the fetch and update endpoints, which answer an unknown id
    /// with 400 rather than the 404 used by delete.
    pub fn into_lookup_error(self) -> AppError {
        match self {
            PantryError::NotFound(_) => AppError::BadRequest("pantry Item Id not found".to_string()),
            other => other.into(),
        }
    }
}

/// Convert PantryError to AppError for standardized error responses
impl From<PantryError> for AppError {
    fn from(err: PantryError) -> Self {
        match err {
            PantryError::MalformedPath
            | PantryError::InvalidIdentifier(_)
            | PantryError::InvalidQueryValue { .. } => AppError::BadRequest(err.to_string()),
            PantryError::NotFound(_) => AppError::NotFound(err.to_string()),
            PantryError::DuplicateName(_) => AppError::NotAcceptable(err.to_string()),
            PantryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for PantryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
