mod rest;

use axum::{Router, routing::get};
use axum_helpers::errors::handlers::method_not_allowed;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{CreateTask, Task, TaskDeletedResponse, TaskMutationResponse, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::list_tasks,
        rest::get_task,
        rest::create_task,
        rest::update_task,
        rest::update_task_by_id,
        rest::delete_task,
        rest::delete_task_by_id,
    ),
    components(
        schemas(Task, CreateTask, UpdateTask, TaskMutationResponse, TaskDeletedResponse)
    ),
    tags(
        (name = "tasks", description = "Task list operations")
    )
)]
pub struct TasksApiDoc;

/// Create the router for the task collection
///
/// Mount it with `nest`; `/` is the collection and `/{id}` a single task.
/// Methods other than GET, POST, PUT, DELETE and OPTIONS get a JSON 405.
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(rest::list_tasks)
                .post(rest::create_task)
                .put(rest::update_task)
                .delete(rest::delete_task)
                .options(rest::preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(rest::get_task)
                .put(rest::update_task_by_id)
                .delete(rest::delete_task_by_id)
                .options(rest::preflight)
                .fallback(method_not_allowed),
        )
        .with_state(shared_service)
}
