//! Products API - REST server

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{close, connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod pages;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL at {}", config.database.redacted_url());
    let db = connect_from_config_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let state = AppState::new(config, db);

    let pages = pages::router(&state.config.server.public_dir)
        .merge(api::health::router(&state));
    let app = create_router::<openapi::ApiDoc>(api::routes(&state), pages).await?;

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let db = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing database connections");
            if let Err(e) = close(db).await {
                tracing::warn!("Failed to close database pool: {}", e);
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
