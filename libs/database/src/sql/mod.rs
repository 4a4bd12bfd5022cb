//! SQL store connector and utilities
//!
//! Connection management with bounded retry, idempotent schema initialization
//! and health probes.

mod config;
mod connector;
mod health;

pub use config::SqlConfig;
pub use connector::{connect, connect_with_options, connect_with_retry, initialize_schema};
pub use health::{check_health, check_health_with_query};

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
