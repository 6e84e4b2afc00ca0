use axum::http::{HeaderValue, Method};
use core_config::cors::CorsConfig;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer described by `config`.
///
/// With explicit origins the layer allows:
/// - the listed origins only
/// - the methods the pantry API serves (GET, POST, PATCH, DELETE, OPTIONS)
/// - Content-Type and Accept headers
/// - 1 hour max age
///
/// Without origins it is [`create_permissive_cors_layer`].
///
/// # Errors
/// Returns `InvalidInput` when an origin is not a valid header value.
pub fn create_cors_layer(config: &CorsConfig) -> io::Result<CorsLayer> {
    let Some(origins) = &config.origins else {
        return Ok(create_permissive_cors_layer());
    };

    let allowed_origins = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600)))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin - **DO NOT USE IN PRODUCTION**.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
