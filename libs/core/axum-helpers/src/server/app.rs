use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, security_headers};
use super::shutdown::ShutdownCoordinator;
use axum::{middleware, Router};
use core_config::cors::CorsConfig;
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use utoipa::OpenApi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes merged at the root, since their paths are part of the public contract
/// - Common middleware (tracing, security headers, CORS, compression)
/// - Plain-text 404 fallback handler
///
/// Health endpoints should be merged by the app with `health_router()`.
///
/// # Type Parameters
/// * `T` - A type implementing `utoipa::OpenApi` for API documentation
///
/// # Errors
/// Returns `InvalidInput` when a configured CORS origin is not a valid header value.
pub fn create_router<T>(apis: Router, cors: &CorsConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = create_cors_layer(cors)?;
    match &cors.origins {
        Some(origins) => info!("CORS configured with allowed origins: {}", origins.join(",")),
        None => info!("CORS_ALLOWED_ORIGIN not set, allowing any origin"),
    }

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Server with coordinated shutdown and cleanup.
///
/// On SIGINT/SIGTERM the server stops accepting connections, in-flight
/// requests drain, and `cleanup` runs with at most `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config, Duration::from_secs(30), async move {
///     info!("flushing state");
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let cleanup_waiter = coordinator.clone();
    let signal_waiter = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        cleanup_waiter.wait_for_shutdown().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal_waiter.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    // Serve can return on error without a signal; release the cleanup task either way.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}
