use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_pantry::{InMemoryPantryRepository, PantryRepository, PantryService, handlers};
use tracing::info;

mod config;
mod openapi;

use config::Config;

/// Pantry routes plus docs, middleware and `/health`.
fn build_app(config: &Config, repository: InMemoryPantryRepository) -> eyre::Result<Router> {
    let service = PantryService::new(repository);
    let api_routes = handlers::router(service);

    let router = create_router::<openapi::ApiDoc>(api_routes, &config.cors)?;

    Ok(router.merge(health_router(config.app)))
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let repository = InMemoryPantryRepository::new();
    let app = build_app(&config, repository.clone())?;

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_production_app(
        app,
        &config.server,
        config.server.shutdown_timeout,
        async move {
            // Nothing is persisted; report what is being dropped
            let remaining = repository.delete_all().await.map(|items| items.len());
            info!(?remaining, "Pantry store released");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Pantry API shutdown complete");
    Ok(())
}
