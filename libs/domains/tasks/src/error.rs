use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{error_response, validation_response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i64),

    #[error("Invalid input: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            TaskError::NotFound(id) => {
                tracing::info!(task_id = id, "Task not found");
                error_response(StatusCode::NOT_FOUND, "Task not found")
            }
            TaskError::Validation(errors) => validation_response(errors),
            TaskError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            TaskError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}
