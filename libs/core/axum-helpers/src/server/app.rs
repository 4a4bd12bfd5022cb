use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use axum::{Json, Router, routing::get};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Creates the application router with common middleware and documentation.
///
/// This function sets up:
/// - `GET /api-docs/openapi.json` serving the document described by `T`
/// - API routes nested under `/api`
/// - `probes` (health and readiness routes) merged at the root
/// - request tracing and the given CORS layer on every route
/// - a JSON 404 fallback
///
/// Domain routers are expected to carry their own state already.
///
/// # Example
/// ```ignore
/// use axum_helpers::{create_cors_layer, create_router, health_router};
///
/// let api_routes = Router::new().nest("/tasks", tasks_router(service));
/// let router = create_router::<ApiDoc>(api_routes, health_router(app_info!()), create_cors_layer("*")?);
/// ```
pub fn create_router<T>(apis: Router, probes: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .route("/api-docs/openapi.json", get(openapi_json::<T>))
        .nest("/api", apis)
        .merge(probes)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
}

async fn openapi_json<T: OpenApi>() -> Json<utoipa::openapi::OpenApi> {
    Json(T::openapi())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `cleanup_timeout`.
///
/// In-flight requests are drained before cleanup starts, so `cleanup` can
/// safely close the connection pool.
///
/// # Errors
/// Returns an error if the listener fails to bind or the server fails while
/// running. Cleanup still runs in the latter case.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     if let Err(e) = db.close().await {
///         tracing::warn!("Failed to close pool: {}", e);
///     }
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", cleanup_timeout);
    match tokio::time::timeout(cleanup_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            cleanup_timeout
        ),
    }

    serve_result
}
