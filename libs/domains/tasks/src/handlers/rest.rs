use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::LenientJson;
use std::sync::Arc;

use crate::error::{TaskError, TaskResult};
use crate::models::{
    CreateTask, Task, TaskDeletedResponse, TaskIdQuery, TaskMutationResponse, UpdateTask,
    parse_task_id,
};
use crate::repository::TaskRepository;
use crate::service::TaskService;

fn id_from_query(query: Result<Query<TaskIdQuery>, QueryRejection>) -> TaskResult<Option<i32>> {
    let Query(query) = query.map_err(|e| TaskError::Validation(e.body_text()))?;
    match query.id {
        Some(raw) => parse_task_id(&raw).map_err(TaskError::Validation),
        None => Ok(None),
    }
}

fn id_from_path(raw: &str) -> TaskResult<Option<i32>> {
    parse_task_id(raw).map_err(TaskError::Validation)
}

/// List all tasks, or get one with `?id=`
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "All tasks newest first, or the task named by `id`", body = Vec<Task>),
        (status = 400, description = "Invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    query: Result<Query<TaskIdQuery>, QueryRejection>,
) -> TaskResult<Response> {
    match id_from_query(query)? {
        Some(id) => Ok(Json(service.get_task(id).await?).into_response()),
        None => Ok(Json(service.list_tasks().await?).into_response()),
    }
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<Task>> {
    let id = id_from_path(&id)?
        .ok_or_else(|| TaskError::Validation("Task ID is required".to_string()))?;

    let task = service.get_task(id).await?;
    Ok(Json(task))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = TaskMutationResponse),
        (status = 400, description = "Title missing, blank or too long"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    LenientJson(input): LenientJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskMutationResponse::created(task)),
    ))
}

/// Update a task named by the `id` in the body
#[utoipa::path(
    put,
    path = "",
    tag = "tasks",
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskMutationResponse),
        (status = 400, description = "Missing ID, no fields or invalid input"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    LenientJson(input): LenientJson<UpdateTask>,
) -> TaskResult<Json<TaskMutationResponse>> {
    let task = service.update_task(input).await?;
    Ok(Json(TaskMutationResponse::updated(task)))
}

/// Update a task by ID; the path ID takes precedence over any `id` in the body
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskMutationResponse),
        (status = 400, description = "No fields or invalid input"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_task_by_id<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    LenientJson(mut input): LenientJson<UpdateTask>,
) -> TaskResult<Json<TaskMutationResponse>> {
    input.id = id_from_path(&id)?;

    let task = service.update_task(input).await?;
    Ok(Json(TaskMutationResponse::updated(task)))
}

/// Delete the task named by `?id=`
#[utoipa::path(
    delete,
    path = "",
    tag = "tasks",
    params(TaskIdQuery),
    responses(
        (status = 200, description = "Task deleted successfully", body = TaskDeletedResponse),
        (status = 400, description = "Missing or invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    query: Result<Query<TaskIdQuery>, QueryRejection>,
) -> TaskResult<Json<TaskDeletedResponse>> {
    let id = service.delete_task(id_from_query(query)?).await?;
    Ok(Json(TaskDeletedResponse::new(id)))
}

/// Delete a task by ID
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task deleted successfully", body = TaskDeletedResponse),
        (status = 400, description = "Invalid task ID"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_task_by_id<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<TaskDeletedResponse>> {
    let id = service.delete_task(id_from_path(&id)?).await?;
    Ok(Json(TaskDeletedResponse::new(id)))
}

/// Plain `OPTIONS` (not a CORS preflight): 200 with no body
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
