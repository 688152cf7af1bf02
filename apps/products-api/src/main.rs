//! Products API - REST server over MongoDB

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        environment = ?config.environment,
        database = config.mongodb.database(),
        collection = %config.products_collection,
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    let mongo_client = database::mongodb::connect_from_config_with_retry(
        &config.mongodb,
        Some(config.retry.clone()),
    )
    .await?;

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let state = AppState::new(config, mongo_client);

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?
        .merge(health_router(state.config.app))
        .merge(api::health::ready_router(state.clone()));

    info!("Starting Products API on {}", state.config.server.address());

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        state.config.shutdown_timeout,
        async move {
            info!("Shutting down: closing MongoDB connections");
            mongo_client.shutdown().await;
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
