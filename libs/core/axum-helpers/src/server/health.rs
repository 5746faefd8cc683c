use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use core_config::AppInfo;
use serde::Serialize;

/// Liveness response: `{"success": true, "service": ..., "status":
/// "running", "version": ..., "timestamp": ...}`. Always 200 while the
/// process is up; it deliberately checks nothing downstream.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

async fn health_handler(State(app): State<AppInfo>) -> impl IntoResponse {
    let response = HealthResponse {
        success: true,
        service: app.name,
        status: "running",
        version: app.version,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

/// Router exposing `GET /health` for the given service identity.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
