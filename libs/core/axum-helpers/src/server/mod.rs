//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Health endpoint
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router::<ApiDoc>(api_routes, &config.cors)?;
//! let app = router.merge(health_router(app_info!()));
//! create_production_app(app, &config.server, config.server.shutdown_timeout, async {}).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{create_production_app, create_router};
pub use health::{health_router, HealthResponse};
pub use shutdown::{shutdown_signal, ShutdownCoordinator};
