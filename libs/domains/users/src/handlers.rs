use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{ApiResponse, MessageResponse};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserInput};
use crate::repository::UserRepository;
use crate::service::UserService;
use crate::stats::{compute_statistics, TaskStatistics};
use crate::tasks_client::{RemoteTask, TasksGateway};

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_user, get_user_tasks, create_user, update_user, delete_user),
    components(schemas(User, UserInput, RemoteTask, TaskStatistics)),
    tags((name = "users", description = "User store operations and task aggregation"))
)]
pub struct ApiDoc;

/// Shared handler state: the local user service plus the gateway to
/// the Tasks service.
pub struct UsersState<R: UserRepository, G: TasksGateway> {
    pub service: UserService<R>,
    pub tasks: G,
}

/// Create the users router with all HTTP endpoints
pub fn router<R, G>(service: UserService<R>, tasks: G) -> Router
where
    R: UserRepository + 'static,
    G: TasksGateway + 'static,
{
    let state = Arc::new(UsersState { service, tasks });

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/{id}/tasks", get(get_user_tasks))
        .with_state(state)
}

/// Parse a path identifier as a positive integer
fn parse_id(raw: &str) -> UserResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(UserError::Validation(vec![
            "Id must be a positive integer".to_string(),
        ])),
    }
}

/// Aggregation payload: the user's tasks plus statistics over them
#[derive(Debug, Serialize)]
pub struct UserTasksResponse {
    pub success: bool,
    pub data: Vec<RemoteTask>,
    pub stats: TaskStatistics,
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<User>),
        (status = 500, description = "Internal server error")
    )
)]
async fn list_users<R: UserRepository, G: TasksGateway>(
    State(state): State<Arc<UsersState<R, G>>>,
) -> UserResult<impl IntoResponse> {
    let users = state.service.list_users().await?;
    let count = users.len();
    Ok(Json(ApiResponse::list(users, count)))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_user<R: UserRepository, G: TasksGateway>(
    State(state): State<Arc<UsersState<R, G>>>,
    Path(id): Path<String>,
) -> UserResult<impl IntoResponse> {
    let user_id = parse_id(&id)?;

    let user = state.service.get_user(user_id).await?;
    Ok(Json(ApiResponse::new(user)))
}

/// Tasks and statistics for a user, fetched from the Tasks service.
///
/// Outcomes are strictly partitioned: invalid id (400) and unknown
/// user (404) short-circuit before the network boundary; a gateway
/// failure of any kind is the dependency-unavailable outcome (503),
/// never conflated with this service's own errors (500).
#[utoipa::path(
    get,
    path = "/{id}/tasks",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Tasks and statistics for the user"),
        (status = 400, description = "Invalid user id"),
        (status = 404, description = "User not found"),
        (status = 503, description = "Tasks service unavailable"),
        (status = 500, description = "Internal server error")
    )
)]
async fn get_user_tasks<R: UserRepository, G: TasksGateway>(
    State(state): State<Arc<UsersState<R, G>>>,
    Path(id): Path<String>,
) -> UserResult<impl IntoResponse> {
    let user_id = parse_id(&id)?;

    // Confirm the user exists locally before crossing the service
    // boundary. A user deleted between this check and the fetch is an
    // accepted race.
    state.service.get_user(user_id).await?;

    let tasks = state.tasks.tasks_for_user(user_id).await?;
    let stats = compute_statistics(&tasks);

    Ok(Json(UserTasksResponse {
        success: true,
        data: tasks,
        stats,
    }))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = "users",
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
async fn create_user<R: UserRepository, G: TasksGateway>(
    State(state): State<Arc<UsersState<R, G>>>,
    Json(input): Json<UserInput>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(user))))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
async fn update_user<R: UserRepository, G: TasksGateway>(
    State(state): State<Arc<UsersState<R, G>>>,
    Path(id): Path<String>,
    Json(input): Json<UserInput>,
) -> UserResult<impl IntoResponse> {
    let user_id = parse_id(&id)?;

    let user = state.service.update_user(user_id, input).await?;
    Ok(Json(ApiResponse::new(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    )
)]
async fn delete_user<R: UserRepository, G: TasksGateway>(
    State(state): State<Arc<UsersState<R, G>>>,
    Path(id): Path<String>,
) -> UserResult<impl IntoResponse> {
    let user_id = parse_id(&id)?;

    state.service.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use crate::tasks_client::{MockTasksGateway, TasksClientError};
    use chrono::Utc;

    fn existing_user(id: i64) -> User {
        let now = Utc::now();
        User {
            id,
            username: "john_doe".to_string(),
            email: "john.doe@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn state(
        repo: MockUserRepository,
        gateway: MockTasksGateway,
    ) -> State<Arc<UsersState<MockUserRepository, MockTasksGateway>>> {
        State(Arc::new(UsersState {
            service: UserService::new(repo),
            tasks: gateway,
        }))
    }

    #[tokio::test]
    async fn test_invalid_id_short_circuits_before_store_and_gateway() {
        for raw in ["abc", "-1", "0"] {
            let mut repo = MockUserRepository::new();
            repo.expect_get_by_id().times(0);
            let mut gateway = MockTasksGateway::new();
            gateway.expect_tasks_for_user().times(0);

            let result = get_user_tasks(state(repo, gateway), Path(raw.to_string())).await;

            assert!(matches!(result, Err(UserError::Validation(_))), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_unknown_user_never_reaches_gateway() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        let mut gateway = MockTasksGateway::new();
        gateway.expect_tasks_for_user().times(0);

        let result = get_user_tasks(state(repo, gateway), Path("999999".to_string())).await;

        assert!(matches!(result, Err(UserError::NotFound(999999))));
    }

    #[tokio::test]
    async fn test_gateway_transport_failure_maps_to_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(|id| Ok(Some(existing_user(id))));
        let mut gateway = MockTasksGateway::new();
        gateway.expect_tasks_for_user().returning(|_| {
            Err(TasksClientError::Transport(
                "connection refused".to_string(),
            ))
        });

        let result = get_user_tasks(state(repo, gateway), Path("1".to_string())).await;

        match result {
            Err(UserError::TasksUnavailable(detail)) => {
                assert_eq!(detail, "connection refused");
            }
            other => panic!("expected TasksUnavailable, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_store_failure_during_existence_check_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Err(UserError::Database("connection pool closed".to_string())));
        let mut gateway = MockTasksGateway::new();
        gateway.expect_tasks_for_user().times(0);

        let result = get_user_tasks(state(repo, gateway), Path("1".to_string())).await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }
}
