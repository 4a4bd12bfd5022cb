//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI document, tracing and CORS
//! - Health and readiness endpoints
//! - Graceful shutdown with a bounded cleanup phase

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
