//! Products API - REST server for the product catalog

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::connect_from_config_with_retry;
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
        "Starting {} v{} ({:?})",
        config.app.name, config.app.version, config.environment
    );
    info!("Connecting to PostgreSQL at {}", config.database.redacted_url());

    let db = connect_from_config_with_retry(&config.database).await?;

    let state = AppState {
        config: config.clone(),
        db,
    };

    // Create tables on first start
    api::init_schema(&state).await?;

    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes).await?;

    info!("Starting Products API on port {}", state.config.server.port);

    let db = state.db.clone();
    create_production_app(app, &state.config.server, async move {
        info!("Shutting down: closing PostgreSQL connections");
        match db.close().await {
            Ok(()) => info!("PostgreSQL connection pool closed"),
            Err(e) => tracing::error!("Failed to close PostgreSQL pool: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
