use std::sync::Arc;
use tracing::{info, instrument};
use validator::{Validate, ValidationErrors};

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, DEMO_TASKS, NewTask, Task, TaskChanges, UpdateTask};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every task, newest first
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Get a task by ID
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn get_task(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Create a task from a trimmed, non-empty title and return it as stored
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        let title = input.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            return Err(TaskError::Validation("Title is required".to_string()));
        }

        let new_task = NewTask {
            title: title.to_string(),
        };
        new_task.validate().map_err(validation_error)?;

        let id = self.repository.insert(new_task).await?;
        info!(task_id = id, "Task created");

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Apply a partial update and return the task as stored
    ///
    /// The ID is checked first, then that at least one field is present, and
    /// only then is the store touched.
    #[instrument(skip(self, input), fields(task_id = ?input.id))]
    pub async fn update_task(&self, input: UpdateTask) -> TaskResult<Task> {
        let id = input
            .id
            .ok_or_else(|| TaskError::Validation("Task ID is required".to_string()))?;

        let title = match input.title {
            Some(title) => {
                let title = title.trim();
                if title.is_empty() {
                    return Err(TaskError::Validation("Title cannot be empty".to_string()));
                }
                Some(title.to_string())
            }
            None => None,
        };

        let changes = TaskChanges {
            title,
            completed: input.completed,
        };
        if changes.is_empty() {
            return Err(TaskError::Validation("No fields to update".to_string()));
        }
        changes.validate().map_err(validation_error)?;

        let rows = self.repository.update(id, changes).await?;
        if rows == 0 {
            return Err(TaskError::NotFound(id));
        }
        info!(task_id = id, "Task updated");

        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Delete a task, returning its ID
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: Option<i32>) -> TaskResult<i32> {
        let id = id.ok_or_else(|| TaskError::Validation("Task ID is required".to_string()))?;

        let rows = self.repository.delete(id).await?;
        if rows == 0 {
            return Err(TaskError::NotFound(id));
        }
        info!(task_id = id, "Task deleted");

        Ok(id)
    }

    /// Insert the demo tasks if the store is empty. Returns how many were inserted.
    #[instrument(skip(self))]
    pub async fn seed_demo_tasks(&self) -> TaskResult<usize> {
        if self.repository.count().await? > 0 {
            return Ok(0);
        }

        for title in DEMO_TASKS {
            self.repository
                .insert(NewTask {
                    title: title.to_string(),
                })
                .await?;
        }

        info!(count = DEMO_TASKS.len(), "Demo tasks inserted");
        Ok(DEMO_TASKS.len())
    }
}

/// First custom message out of a validator error set
fn validation_error(errors: ValidationErrors) -> TaskError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());

    TaskError::Validation(message)
}
