//! Relational store plumbing for the task service.
//!
//! - [`common`]: error type and the fixed-delay connection retry policy
//! - [`sql`]: connection config, connect-with-retry, schema initialization and health probes
//!
//! The `sql` module speaks to any SeaORM backend selected by URL scheme:
//! `postgres://` in production, `sqlite://` for local runs and tests.
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryPolicy;
//! use database::sql::{self, SqlConfig};
//! use migration::Migrator;
//!
//! let config = SqlConfig::from_env()?;
//! let db = sql::connect_with_retry(config, &RetryPolicy::from_env()?).await?;
//! sql::initialize_schema::<Migrator>(&db, "SELECT COUNT(*) FROM tasks").await?;
//! ```

pub mod common;
pub mod sql;

pub use common::{DatabaseError, DatabaseResult, RetryPolicy};
