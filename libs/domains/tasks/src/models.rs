use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Tasks inserted, in this order, when the store is empty at first start
pub const DEMO_TASKS: [&str; 5] = [
    "Welcome to your Todo List! 🎉",
    "Configure the Jenkins pipeline",
    "Test the 3 Git workflows",
    "Create the PowerPoint presentation",
    "Prepare the demo",
];

/// Task entity - a single todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Identifier assigned by the store, never reused
    pub id: i32,
    /// Task title, trimmed and never empty
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a task
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateTask {
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
}

/// Request body for updating a task
///
/// `id` may be a JSON integer or a numeric string. `completed` accepts
/// booleans, numbers and strings (see [`lenient::flag`]). Omitted or `null`
/// fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTask {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<i32>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub completed: Option<bool>,
}

/// `?id=` on the collection route
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaskIdQuery {
    /// Task ID; an empty value counts as absent
    pub id: Option<String>,
}

/// Validated input for inserting a row
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewTask {
    #[validate(length(min = 1, max = 255, message = "Title must be at most 255 characters"))]
    pub title: String,
}

/// Validated column changes for a partial update
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TaskChanges {
    #[validate(length(min = 1, max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Response for create and update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskMutationResponse {
    pub status: String,
    pub message: String,
    pub task: Task,
}

impl TaskMutationResponse {
    pub fn created(task: Task) -> Self {
        Self {
            status: "success".to_string(),
            message: "Task created successfully".to_string(),
            task,
        }
    }

    pub fn updated(task: Task) -> Self {
        Self {
            status: "success".to_string(),
            message: "Task updated successfully".to_string(),
            task,
        }
    }
}

/// Response for delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskDeletedResponse {
    pub status: String,
    pub message: String,
    pub id: i32,
}

impl TaskDeletedResponse {
    pub fn new(id: i32) -> Self {
        Self {
            status: "success".to_string(),
            message: "Task deleted successfully".to_string(),
            id,
        }
    }
}

/// Parse a task ID from a path segment or query value.
///
/// Blank input is `None`; anything that is not an `i32` is rejected.
pub fn parse_task_id(raw: &str) -> Result<Option<i32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| "Task ID must be an integer".to_string())
}

/// Deserializers for loosely typed client input
pub mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;
    use serde_json::Value;

    const TRUTHY: [&str; 4] = ["1", "true", "on", "yes"];

    /// Integer or numeric string. `null` and blank strings are `None`.
    pub fn id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| D::Error::custom("Task ID must be an integer")),
            Some(Value::String(s)) => super::parse_task_id(&s).map_err(D::Error::custom),
            Some(_) => Err(D::Error::custom("Task ID must be an integer")),
        }
    }

    /// Boolean-ish flag.
    ///
    /// - booleans as is
    /// - numbers: `1` is true, anything else false
    /// - strings: "1", "true", "on", "yes" (any case) are true, anything else false
    /// - `null` is `None`; arrays and objects are rejected
    pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(Value::Number(n)) => Ok(Some(n.as_f64() == Some(1.0))),
            Some(Value::String(s)) => {
                let s = s.trim().to_ascii_lowercase();
                Ok(Some(TRUTHY.contains(&s.as_str())))
            }
            Some(Value::Array(_)) | Some(Value::Object(_)) => Err(D::Error::custom(
                "completed must be a boolean, number or string",
            )),
        }
    }
}
