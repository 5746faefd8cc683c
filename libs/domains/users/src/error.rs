use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::{error_response, error_response_with_detail, validation_response};
use thiserror::Error;

use crate::tasks_client::TasksClientError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i64),

    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid input: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The Tasks service could not be reached or did not answer
    /// meaningfully. Kept distinct from [`UserError::Internal`] so
    /// monitoring can tell "their outage" from "our bug".
    #[error("Tasks Service is unavailable: {0}")]
    TasksUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        match self {
            UserError::NotFound(id) => {
                tracing::info!(user_id = id, "User not found");
                error_response(StatusCode::NOT_FOUND, "User not found")
            }
            UserError::DuplicateUsername => {
                error_response(StatusCode::CONFLICT, "Username already exists")
            }
            UserError::DuplicateEmail => {
                error_response(StatusCode::CONFLICT, "Email already exists")
            }
            UserError::Validation(errors) => validation_response(errors),
            UserError::TasksUnavailable(detail) => {
                tracing::warn!("Tasks service unavailable: {}", detail);
                error_response_with_detail(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Tasks Service is unavailable",
                    detail,
                )
            }
            UserError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            UserError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        }
    }
}

/// Uniqueness violations are recognized by the violated constraint's
/// identity as reported by the database driver, never by matching
/// substrings of the error message text.
impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        if let Some(sea_orm::SqlErr::UniqueConstraintViolation(constraint)) = err.sql_err() {
            if constraint.contains("users_username_key") {
                return UserError::DuplicateUsername;
            }
            if constraint.contains("users_email_key") {
                return UserError::DuplicateEmail;
            }
        }

        UserError::Database(err.to_string())
    }
}

/// Every gateway failure collapses to the single 503 outcome; the
/// variant's own message rides along as the diagnostic detail.
impl From<TasksClientError> for UserError {
    fn from(err: TasksClientError) -> Self {
        UserError::TasksUnavailable(err.to_string())
    }
}
