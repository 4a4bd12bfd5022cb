use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::sql;
use domain_tasks::{SqlTaskRepository, TaskService};
use migration::Migrator;
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Query that only succeeds once the `tasks` table exists
const SCHEMA_PROBE: &str = "SELECT COUNT(*) FROM tasks";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(database = ?config.database, retry = ?config.retry, "Connecting to task store");

    let db = sql::connect_with_retry(config.database.clone(), &config.retry)
        .await
        .map_err(|e| eyre::eyre!("Task store unavailable: {}", e))?;

    sql::initialize_schema::<Migrator>(&db, SCHEMA_PROBE)
        .await
        .map_err(|e| eyre::eyre!("Task store schema unusable: {}", e))?;

    let state = AppState { config, db };

    if state.config.seed_demo_tasks {
        seed_demo_tasks(&state).await;
    }

    let app = api::app(&state)?;

    info!("Starting todo API with graceful shutdown (30s cleanup timeout)");

    let AppState { config, db } = state;

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing task store connections");
            match db.close().await {
                Ok(_) => info!("Task store connections closed"),
                Err(e) => tracing::error!("Error closing task store connections: {}", e),
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todo API shutdown complete");
    Ok(())
}

/// Demo seeding never aborts start-up.
async fn seed_demo_tasks(state: &AppState) {
    let service = TaskService::new(SqlTaskRepository::new(state.db.clone()));

    match service.seed_demo_tasks().await {
        Ok(0) => info!("Task store already populated, skipping demo tasks"),
        Ok(count) => info!(count, "Seeded demo tasks"),
        Err(e) => warn!("Failed to seed demo tasks: {}", e),
    }
}
