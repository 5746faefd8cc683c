//! End-to-end tests for the user tasks aggregation endpoint, driven
//! through the users router with an in-memory store and a stub Tasks
//! service on a live socket.
//!
//! The contract under test is the four-way outcome partition: invalid
//! input (400), unknown user (404), dependency unavailable (503), and
//! internal error (500) must all be distinguishable from the response
//! alone.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{extract::State, routing::get, Json, Router};
use domain_users::{handlers, HttpTasksClient, InMemoryUserRepository, UserInput, UserService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

struct Upstream {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

/// Stub Tasks service that serves a canned payload and counts hits
async fn spawn_upstream(response: Value, status: StatusCode) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let router = Router::new()
        .route(
            "/tasks/user/{id}",
            get(
                move |State((response, status, counter)): State<(
                    Value,
                    StatusCode,
                    Arc<AtomicUsize>,
                )>| async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, Json(response))
                },
            ),
        )
        .with_state((response, status, counter));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{}", addr),
        hits,
    }
}

/// Base URL with nothing listening behind it
async fn dead_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn task_json(id: i64, user_id: i64, status: &str, priority: &str) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "title": format!("task {id}"),
        "description": "",
        "status": status,
        "priority": priority,
        "dueDate": null,
        "createdAt": "2025-12-18T10:00:00.000Z",
        "updatedAt": "2025-12-19T08:00:00.000Z"
    })
}

/// Users app with one seeded user (id 1) and the given Tasks base url
async fn app_with_user(base_url: &str) -> Router {
    let service = UserService::new(InMemoryUserRepository::new());
    service
        .create_user(UserInput {
            username: Some("john_doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
        })
        .await
        .unwrap();

    handlers::router(service, HttpTasksClient::new(base_url))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_aggregation_returns_tasks_and_statistics() {
    let upstream = spawn_upstream(
        json!({
            "success": true,
            "data": [
                task_json(1, 1, "pending", "high"),
                task_json(2, 1, "completed", "low"),
                task_json(3, 1, "completed", "low"),
            ],
            "count": 3
        }),
        StatusCode::OK,
    )
    .await;

    let app = app_with_user(&upstream.base_url).await;
    let (status, body) = get_json(app, "/1/tasks").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let stats = &body["stats"];
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["byStatus"]["pending"], 1);
    assert_eq!(stats["byStatus"]["completed"], 2);
    assert_eq!(stats["byStatus"]["in-progress"], 0);
    assert_eq!(stats["byStatus"]["cancelled"], 0);
    assert_eq!(stats["byPriority"]["high"], 1);
    assert_eq!(stats["byPriority"]["low"], 2);
    assert_eq!(stats["byPriority"]["medium"], 0);

    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_aggregation_with_no_tasks_is_all_zeroes() {
    let upstream = spawn_upstream(
        json!({"success": true, "data": [], "count": 0}),
        StatusCode::OK,
    )
    .await;

    let app = app_with_user(&upstream.base_url).await;
    let (status, body) = get_json(app, "/1/tasks").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["stats"]["total"], 0);
    assert_eq!(body["stats"]["byStatus"]["pending"], 0);
    assert_eq!(body["stats"]["byPriority"]["medium"], 0);
}

#[tokio::test]
async fn test_unknown_user_is_404_and_gateway_is_not_invoked() {
    let upstream = spawn_upstream(
        json!({"success": true, "data": [], "count": 0}),
        StatusCode::OK,
    )
    .await;

    let app = app_with_user(&upstream.base_url).await;
    let (status, body) = get_json(app, "/999999/tasks").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "User not found"}));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_id_is_400_and_gateway_is_not_invoked() {
    let upstream = spawn_upstream(
        json!({"success": true, "data": [], "count": 0}),
        StatusCode::OK,
    )
    .await;

    let app = app_with_user(&upstream.base_url).await;

    for uri in ["/abc/tasks", "/-1/tasks"] {
        let (status, body) = get_json(app.clone(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false);
        assert_eq!(body["errors"][0], "Id must be a positive integer");
    }

    assert_eq!(upstream.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_tasks_service_is_503_not_500() {
    let base_url = dead_upstream().await;

    let app = app_with_user(&base_url).await;
    let (status, body) = get_json(app, "/1/tasks").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Tasks Service is unavailable");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_upstream_error_status_is_503_with_diagnostic() {
    let upstream = spawn_upstream(
        json!({"success": false, "error": "task store exploded"}),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;

    let app = app_with_user(&upstream.base_url).await;
    let (status, body) = get_json(app, "/1/tasks").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Tasks Service is unavailable");
    assert_eq!(body["message"], "task store exploded");
}

#[tokio::test]
async fn test_out_of_enum_values_count_only_toward_total() {
    let upstream = spawn_upstream(
        json!({
            "success": true,
            "data": [
                task_json(1, 1, "archived", "urgent"),
                task_json(2, 1, "pending", "low"),
            ],
            "count": 2
        }),
        StatusCode::OK,
    )
    .await;

    let app = app_with_user(&upstream.base_url).await;
    let (status, body) = get_json(app, "/1/tasks").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["total"], 2);
    assert_eq!(body["stats"]["byStatus"]["pending"], 1);
    assert_eq!(body["stats"]["byPriority"]["low"], 1);
    // unknown values are echoed back verbatim in the payload
    assert_eq!(body["data"][0]["status"], "archived");
    assert_eq!(body["data"][0]["priority"], "urgent");
}
