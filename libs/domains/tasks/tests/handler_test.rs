//! Handler tests for the Tasks domain
//!
//! These drive the tasks router directly (no `/api` prefix, no CORS layer)
//! against a migrated SQLite store:
//! - Request parsing (lenient JSON, path and query IDs)
//! - Response envelopes and status codes
//! - Error responses

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tasks::models::{NewTask, TaskChanges};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::{TestDataBuilder, TestDatabase};
use tower::ServiceExt; // For oneshot()

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn setup() -> (TestDatabase, Router) {
    let db = TestDatabase::new().await;
    let service = TaskService::new(SqlTaskRepository::new(db.connection()));
    (db, handlers::router(service))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn create(app: &Router, title: &str) -> Task {
    let response = send(app, "POST", "/", Some(json!({ "title": title }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: TaskMutationResponse = json_body(response.into_body()).await;
    body.task
}

async fn list(app: &Router) -> Vec<Task> {
    let response = send(app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response.into_body()).await
}

async fn error_body(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

#[tokio::test]
async fn test_create_round_trip() {
    let (_db, app) = setup().await;
    let existing = create(&app, "Something else").await;

    let response = send(&app, "POST", "/", Some(json!({ "title": "Buy milk" }))).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Task created successfully");
    assert_eq!(body["task"]["title"], "Buy milk");
    assert_eq!(body["task"]["completed"], json!(false));

    let id = body["task"]["id"].as_i64().unwrap() as i32;
    assert_ne!(id, existing.id);

    let tasks = list(&app).await;
    assert!(tasks.iter().any(|t| t.id == id && t.title == "Buy milk"));
}

#[tokio::test]
async fn test_create_trims_title() {
    let (_db, app) = setup().await;

    let task = create(&app, "   Walk the dog \t").await;
    assert_eq!(task.title, "Walk the dog");
}

#[tokio::test]
async fn test_create_whitespace_title_is_rejected_without_insert() {
    let (_db, app) = setup().await;
    create(&app, "Keep me").await;
    let before = list(&app).await.len();

    let response = send(&app, "POST", "/", Some(json!({ "title": "   " }))).await;
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Title is required");
    assert_eq!(list(&app).await.len(), before);
}

#[tokio::test]
async fn test_create_missing_title_and_empty_body_are_rejected() {
    let (_db, app) = setup().await;

    for body in [Some(json!({})), None] {
        let response = send(&app, "POST", "/", body).await;
        let (status, body) = error_body(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Title is required");
    }
}

#[tokio::test]
async fn test_create_title_too_long_is_rejected() {
    let (_db, app) = setup().await;

    let response = send(&app, "POST", "/", Some(json!({ "title": "x".repeat(256) }))).await;
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title must be at most 255 characters");
}

#[tokio::test]
async fn test_malformed_json_is_validation_error() {
    let (_db, app) = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert_eq!(body["message"], "Invalid JSON body");
}

#[tokio::test]
async fn test_body_without_content_type_is_accepted() {
    let (_db, app) = setup().await;

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(r#"{"title":"No header"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_update_partial_keeps_title() {
    let (_db, app) = setup().await;
    let builder = TestDataBuilder::from_test_name("handler_update_partial");
    let task = create(&app, &builder.title("original")).await;

    let response = send(&app, "PUT", "/", Some(json!({ "id": task.id, "completed": true }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: TaskMutationResponse = json_body(response.into_body()).await;
    assert_eq!(body.message, "Task updated successfully");
    assert_eq!(body.task.id, task.id);
    assert_eq!(body.task.title, builder.title("original"));
    assert!(body.task.completed);
    assert_eq!(body.task.created_at, task.created_at);
    assert!(body.task.updated_at >= task.updated_at);
}

#[tokio::test]
async fn test_update_title_only_keeps_completed() {
    let (_db, app) = setup().await;
    let task = create(&app, "Draft").await;
    send(&app, "PUT", "/", Some(json!({ "id": task.id, "completed": "yes" }))).await;

    let response = send(&app, "PUT", "/", Some(json!({ "id": task.id, "title": "  Final " }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: TaskMutationResponse = json_body(response.into_body()).await;
    assert_eq!(body.task.title, "Final");
    assert!(body.task.completed);
}

#[tokio::test]
async fn test_update_without_fields_is_rejected() {
    let (_db, app) = setup().await;
    let task = create(&app, "Untouched").await;

    let response = send(&app, "PUT", "/", Some(json!({ "id": task.id }))).await;
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");
}

#[tokio::test]
async fn test_update_without_id_is_rejected() {
    let (_db, app) = setup().await;

    let response = send(&app, "PUT", "/", Some(json!({ "completed": true }))).await;
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task ID is required");
}

#[tokio::test]
async fn test_update_blank_title_is_rejected() {
    let (_db, app) = setup().await;
    let task = create(&app, "Keep").await;

    let response = send(&app, "PUT", "/", Some(json!({ "id": task.id, "title": " " }))).await;
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title cannot be empty");
}

#[tokio::test]
async fn test_update_nonexistent_is_not_found() {
    let (_db, app) = setup().await;

    let response = send(&app, "PUT", "/", Some(json!({ "id": 999_999, "title": "Ghost" }))).await;
    let (status, body) = error_body(response).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Task not found");
}

#[tokio::test]
async fn test_update_accepts_string_id_and_truthy_flags() {
    let (_db, app) = setup().await;
    let task = create(&app, "Flags").await;

    for (value, expected) in [(json!("on"), true), (json!(0), false), (json!("1"), true), (json!("nope"), false)] {
        let response = send(
            &app,
            "PUT",
            "/",
            Some(json!({ "id": task.id.to_string(), "completed": value })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: TaskMutationResponse = json_body(response.into_body()).await;
        assert_eq!(body.task.completed, expected);
    }
}

#[tokio::test]
async fn test_update_rejects_array_flag() {
    let (_db, app) = setup().await;
    let task = create(&app, "Array").await;

    let response = send(&app, "PUT", "/", Some(json!({ "id": task.id, "completed": [true] }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_by_path_id_wins_over_body() {
    let (_db, app) = setup().await;
    let target = create(&app, "Target").await;
    let other = create(&app, "Other").await;

    let response = send(
        &app,
        "PUT",
        &format!("/{}", target.id),
        Some(json!({ "id": other.id, "completed": true })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: TaskMutationResponse = json_body(response.into_body()).await;
    assert_eq!(body.task.id, target.id);
    assert!(body.task.completed);

    let other_now = list(&app).await.into_iter().find(|t| t.id == other.id).unwrap();
    assert!(!other_now.completed);
}

#[tokio::test]
async fn test_delete_then_delete_again_is_not_found() {
    let (_db, app) = setup().await;
    let task = create(&app, "Short lived").await;

    let response = send(&app, "DELETE", &format!("/?id={}", task.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: TaskDeletedResponse = json_body(response.into_body()).await;
    assert_eq!(body.status, "success");
    assert_eq!(body.message, "Task deleted successfully");
    assert_eq!(body.id, task.id);

    let response = send(&app, "DELETE", &format!("/?id={}", task.id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(list(&app).await.iter().all(|t| t.id != task.id));
}

#[tokio::test]
async fn test_delete_by_path() {
    let (_db, app) = setup().await;
    let task = create(&app, "Path delete").await;

    let response = send(&app, "DELETE", &format!("/{}", task.id), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "DELETE", &format!("/{}", task.id), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_id() {
    let (_db, app) = setup().await;

    for uri in ["/", "/?id="] {
        let response = send(&app, "DELETE", uri, None).await;
        let (status, body) = error_body(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Task ID is required");
    }
}

#[tokio::test]
async fn test_non_integer_ids_are_rejected() {
    let (_db, app) = setup().await;

    for (method, uri) in [("GET", "/?id=abc"), ("DELETE", "/?id=1.5"), ("GET", "/abc"), ("DELETE", "/x1")] {
        let response = send(&app, method, uri, None).await;
        let (status, body) = error_body(response).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(body["message"], "Task ID must be an integer");
    }
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let (_db, app) = setup().await;
    let t1 = create(&app, "T1").await;
    let t2 = create(&app, "T2").await;
    let t3 = create(&app, "T3").await;

    let ids: Vec<i32> = list(&app).await.into_iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![t3.id, t2.id, t1.id]);
}

#[tokio::test]
async fn test_list_empty_store_is_empty_array() {
    let (_db, app) = setup().await;

    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_one_by_query_and_path() {
    let (_db, app) = setup().await;
    let task = create(&app, "Find me").await;

    for uri in [format!("/?id={}", task.id), format!("/{}", task.id)] {
        let response = send(&app, "GET", &uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let found: Task = json_body(response.into_body()).await;
        assert_eq!(found, task);
    }

    let response = send(&app, "GET", "/?id=999999", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_options_is_ok_with_empty_body() {
    let (_db, app) = setup().await;

    for uri in ["/", "/1"] {
        let response = send(&app, "OPTIONS", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}

#[tokio::test]
async fn test_unsupported_method_is_405_json() {
    let (_db, app) = setup().await;

    for uri in ["/", "/1"] {
        let response = send(&app, "PATCH", uri, Some(json!({ "title": "x" }))).await;
        let (status, body) = error_body(response).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
        assert_eq!(body["code"], 1006);
    }
}

/// Repository whose every call fails the way a broken store does
struct BrokenRepository;

#[async_trait]
impl TaskRepository for BrokenRepository {
    async fn list(&self) -> TaskResult<Vec<Task>> {
        Err(TaskError::Database(
            "relation \"tasks\" does not exist".to_string(),
        ))
    }

    async fn insert(&self, _input: NewTask) -> TaskResult<i32> {
        Err(TaskError::Database("disk I/O error".to_string()))
    }

    async fn get_by_id(&self, _id: i32) -> TaskResult<Option<Task>> {
        Err(TaskError::Database("disk I/O error".to_string()))
    }

    async fn update(&self, _id: i32, _changes: TaskChanges) -> TaskResult<u64> {
        Err(TaskError::Database("disk I/O error".to_string()))
    }

    async fn delete(&self, _id: i32) -> TaskResult<u64> {
        Err(TaskError::Database("pool timed out".to_string()))
    }

    async fn count(&self) -> TaskResult<u64> {
        Err(TaskError::Database("disk I/O error".to_string()))
    }
}

#[tokio::test]
async fn test_store_errors_do_not_leak_detail() {
    let app = handlers::router(TaskService::new(BrokenRepository));

    let response = send(&app, "GET", "/", None).await;
    let (status, body) = error_body(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert_eq!(body["message"], "A database error occurred");
    assert!(!body.to_string().contains("relation"));

    let response = send(&app, "POST", "/", Some(json!({ "title": "x" }))).await;
    let (status, body) = error_body(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("disk"));

    let response = send(&app, "DELETE", "/?id=1", None).await;
    let (status, body) = error_body(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert!(!body.to_string().contains("pool"));
}

#[tokio::test]
async fn test_lost_connection_mid_request_is_500() {
    let (db, app) = setup().await;
    db.connection().close().await.unwrap();

    let response = send(&app, "GET", "/", None).await;
    let (status, body) = error_body(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 2001);
    assert_eq!(body["error"], "DATABASE_ERROR");
    assert_eq!(body["message"], "A database error occurred");

    let response = send(&app, "POST", "/", Some(json!({ "title": "x" }))).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_validation_runs_before_store_is_touched() {
    let app = handlers::router(TaskService::new(BrokenRepository));

    let response = send(&app, "POST", "/", Some(json!({ "title": "" }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "PUT", "/", Some(json!({ "id": 1 }))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "DELETE", "/", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
