//! Application state shared by the probe handlers and the shutdown path.

use sea_orm::DatabaseConnection;

/// Shared application state.
///
/// Cloning is cheap: the connection is a pool handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Task store connection pool
    pub db: DatabaseConnection,
}
