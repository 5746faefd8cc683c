use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure envelope: `{"success": false, "error": "<message>"}`
pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": error.into(),
        })),
    )
        .into_response()
}

/// Failure envelope with an extra diagnostic line, used for dependency
/// outages: `{"success": false, "error": ..., "message": ...}`
pub fn error_response_with_detail(
    status: StatusCode,
    error: impl Into<String>,
    message: impl Into<String>,
) -> Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": error.into(),
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Validation failure envelope: `{"success": false, "errors": [...]}`
pub fn validation_response(errors: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "errors": errors,
        })),
    )
        .into_response()
}

/// Fallback handler for unknown routes
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}
