//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, health endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: `AppError` with plain-text responses and logged error codes
//! - **[`extractors`]**: Custom extractors (content-type agnostic JSON body)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{cors::CorsConfig, server::ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes, &CorsConfig::permissive())?;
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export server types
pub use server::{
    create_production_app, create_router, health_router, shutdown_signal,
    HealthResponse, ShutdownCoordinator,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

// Re-export error types
pub use errors::{plain_text_error, AppError, ErrorCode};

// Re-export extractors
pub use extractors::JsonBody;
