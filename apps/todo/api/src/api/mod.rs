use axum::{Router, routing::get};
use axum_helpers::{create_cors_layer, create_router, health_router};
use domain_tasks::{SqlTaskRepository, TaskService};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &AppState) -> Router {
    let service = TaskService::new(SqlTaskRepository::new(state.db.clone()));

    Router::new().nest(&state.config.tasks_route, domain_tasks::router(service))
}

/// Creates a router with the /ready endpoint that pings the task store.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The complete application: API routes, probes, OpenAPI document, tracing and CORS.
pub fn app(state: &AppState) -> eyre::Result<Router> {
    let cors = create_cors_layer(&state.config.cors_allowed_origin)
        .map_err(|e| eyre::eyre!("CORS configuration failed: {}", e))?;

    let probes = health_router(state.config.app).merge(ready_router(state.clone()));

    Ok(create_router::<ApiDoc>(routes(state), probes, cors))
}
