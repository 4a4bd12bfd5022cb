//! Tasks Domain
//!
//! Todo tasks stored in a relational table and served as a small REST
//! collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP routes, ID parsing, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + SeaORM implementation)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{SqlTaskRepository, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite://tasks.db?mode=rwc").await?;
//!
//! let service = TaskService::new(SqlTaskRepository::new(db));
//! let app = axum::Router::new().nest("/api/tasks", domain_tasks::router(service));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sql;

pub use error::{TaskError, TaskResult};
pub use handlers::{TasksApiDoc, router};
pub use models::{
    CreateTask, DEMO_TASKS, Task, TaskDeletedResponse, TaskMutationResponse, UpdateTask,
};
pub use repository::TaskRepository;
pub use service::TaskService;
pub use sql::SqlTaskRepository;
