//! Remote Tasks Gateway: the client the Users service uses to fetch a
//! user's tasks from the Tasks service over HTTP.
//!
//! Owns request construction, response parsing and failure
//! classification. Callers only ever see [`TasksClientError`]; at the
//! endpoint every variant translates to the same "dependency
//! unavailable" outcome, the variants exist for diagnostics.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

/// Bounded wait for the full round trip; expiry is a transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A task as returned by the Tasks service.
///
/// `status` and `priority` stay plain strings on this side of the
/// boundary: values outside the enumerated sets must flow through to
/// the statistics aggregation (which ignores them) and be echoed back
/// verbatim in the response payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTask {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gateway failure classification.
///
/// The display strings carry the diagnostic that ends up in the 503
/// response's `message` field.
#[derive(Debug, Error)]
pub enum TasksClientError {
    /// The round trip could not be completed (connection refused,
    /// timeout, DNS failure)
    #[error("{0}")]
    Transport(String),

    /// A response arrived but its body was not the expected shape
    #[error("{0}")]
    InvalidResponse(String),

    /// The Tasks service answered with a non-success status
    #[error("{0}")]
    Upstream(String),
}

/// The seam the aggregation endpoint depends on, so tests can swap in
/// a double without a live Tasks service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksGateway: Send + Sync {
    /// Fetch the tasks belonging to `user_id`; an empty list is a
    /// normal answer, not an error.
    async fn tasks_for_user(&self, user_id: i64) -> Result<Vec<RemoteTask>, TasksClientError>;
}

/// Production gateway: one reqwest client, reused across calls.
#[derive(Debug, Clone)]
pub struct HttpTasksClient {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TasksEnvelope {
    #[serde(default)]
    data: Option<Vec<RemoteTask>>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpTasksClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            // same failure mode as reqwest::Client::new(): only a
            // broken TLS backend can get here
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl TasksGateway for HttpTasksClient {
    async fn tasks_for_user(&self, user_id: i64) -> Result<Vec<RemoteTask>, TasksClientError> {
        let url = format!(
            "{}/tasks/user/{}",
            self.base_url.trim_end_matches('/'),
            user_id
        );

        let response = self.http.get(&url).send().await.map_err(|e| {
            tracing::warn!(user_id, "Tasks service request failed: {}", e);
            TasksClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        let envelope: TasksEnvelope = response.json().await.map_err(|e| {
            tracing::warn!(user_id, "Unparseable tasks service response: {}", e);
            TasksClientError::InvalidResponse("Failed to parse response".to_string())
        })?;

        if status.is_success() {
            Ok(envelope.data.unwrap_or_default())
        } else {
            let message = envelope
                .error
                .unwrap_or_else(|| "Failed to fetch tasks".to_string());
            tracing::warn!(user_id, %status, "Tasks service returned an error: {}", message);
            Err(TasksClientError::Upstream(message))
        }
    }
}
