use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskChanges};

/// Repository trait for Task persistence
///
/// Every method is a single statement against the store; atomicity comes
/// from the store itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks, newest first (`created_at DESC, id DESC`)
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Insert a task with `completed = false` and return its new ID
    async fn insert(&self, input: NewTask) -> TaskResult<i32>;

    /// Get a task by ID
    async fn get_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Apply the provided columns and refresh `updated_at`; returns rows affected
    async fn update(&self, id: i32, changes: TaskChanges) -> TaskResult<u64>;

    /// Delete a task by ID; returns rows affected
    async fn delete(&self, id: i32) -> TaskResult<u64>;

    /// Count all tasks
    async fn count(&self) -> TaskResult<u64>;
}
