//! Handler tests for the Users domain CRUD surface, driven through the
//! router with an in-memory repository. The gateway is pointed at a
//! closed port: CRUD endpoints must never touch it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_users::{handlers, HttpTasksClient, InMemoryUserRepository, UserService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    app_with_service(UserService::new(InMemoryUserRepository::new())).await
}

async fn app_with_service(service: UserService<InMemoryUserRepository>) -> Router {
    // nothing listens here; CRUD paths must not care
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    handlers::router(service, HttpTasksClient::new(format!("http://{}", addr)))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_user_returns_201_with_envelope() {
    let app = app().await;

    let response = app
        .oneshot(post_json(
            "/",
            json!({
                "username": "john_doe",
                "email": "john.doe@example.com",
                "firstName": "John",
                "lastName": "Doe"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], "john_doe");
    assert_eq!(body["data"]["firstName"], "John");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_create_user_validation_lists_messages() {
    let app = app().await;

    let response = app
        .oneshot(post_json("/", json!({"email": "not-an-email"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response.into_body()).await;
    let errors: Vec<String> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e.as_str().unwrap().to_string())
        .collect();
    assert!(errors.contains(&"Username is required and must be a non-empty string".to_string()));
    assert!(errors.contains(&"Email must be a valid email address".to_string()));
}

#[tokio::test]
async fn test_duplicate_username_and_email_yield_distinct_conflicts() {
    let service = UserService::new(InMemoryUserRepository::new());
    service
        .create_user(domain_users::UserInput {
            username: Some("john_doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let app = app_with_service(service).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/",
            json!({"username": "john_doe", "email": "fresh@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({"success": false, "error": "Username already exists"})
    );

    let response = app
        .oneshot(post_json(
            "/",
            json!({"username": "fresh_name", "email": "john.doe@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({"success": false, "error": "Email already exists"})
    );
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let app = app().await;

    let response = app
        .oneshot(Request::builder().uri("/999999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!({"success": false, "error": "User not found"}));
}

#[tokio::test]
async fn test_update_user_keeps_username_immutable() {
    let service = UserService::new(InMemoryUserRepository::new());
    let created = service
        .create_user(domain_users::UserInput {
            username: Some("john_doe".to_string()),
            email: Some("john.doe@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let app = app_with_service(service).await;

    let response = app
        .oneshot(put_json(
            &format!("/{}", created.id),
            json!({
                "username": "hijacked",
                "email": "john.doe@example.com",
                "firstName": "Johnny"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["username"], "john_doe");
    assert_eq!(body["data"]["firstName"], "Johnny");
}

#[tokio::test]
async fn test_list_users_returns_count() {
    let service = UserService::new(InMemoryUserRepository::new());
    for (username, email) in [("a_user", "a@example.com"), ("b_user", "b@example.com")] {
        service
            .create_user(domain_users::UserInput {
                username: Some(username.to_string()),
                email: Some(email.to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let app = app_with_service(service).await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_user_returns_message_then_404() {
    let service = UserService::new(InMemoryUserRepository::new());
    let created = service
        .create_user(domain_users::UserInput {
            username: Some("doomed".to_string()),
            email: Some("doomed@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let app = app_with_service(service).await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({"success": true, "message": "User deleted successfully"})
    );

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
