use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ApiResponse, MessageResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskInput};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, get_task, list_tasks_by_user, create_task, update_task, delete_task),
    components(schemas(Task, TaskInput)),
    tags((name = "tasks", description = "Task store operations"))
)]
pub struct ApiDoc;

/// Create the tasks router with all HTTP endpoints
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route(
            "/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/user/{user_id}", get(list_tasks_by_user))
        .with_state(shared_service)
}

/// Parse a path identifier as a positive integer
fn parse_id(raw: &str) -> TaskResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(TaskError::Validation(vec![
            "Id must be a positive integer".to_string(),
        ])),
    }
}

/// List all tasks
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<impl IntoResponse> {
    let tasks = service.list_tasks().await?;
    let count = tasks.len();
    Ok(Json(ApiResponse::list(tasks, count)))
}

/// Get a task by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid task id"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    let task_id = parse_id(&id)?;

    let task = service.get_task(task_id).await?;
    Ok(Json(ApiResponse::new(task)))
}

/// List the tasks belonging to a user.
///
/// This is the surface the Users service consumes; an unknown user
/// yields an empty list, not an error.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "tasks",
    params(("user_id" = String, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "Tasks for the user", body = Vec<Task>),
        (status = 400, description = "Invalid user id"),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_tasks_by_user<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(user_id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    let user_id = parse_id(&user_id)?;

    let tasks = service.tasks_for_user(user_id).await?;
    let count = tasks.len();
    Ok(Json(ApiResponse::list(tasks, count)))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = TaskInput,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Json(input): Json<TaskInput>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(task))))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    request_body = TaskInput,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    Json(input): Json<TaskInput>,
) -> TaskResult<impl IntoResponse> {
    let task_id = parse_id(&id)?;

    let task = service.update_task(task_id, input).await?;
    Ok(Json(ApiResponse::new(task)))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    let task_id = parse_id(&id)?;

    service.delete_task(task_id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
