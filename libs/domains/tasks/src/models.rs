use chrono::{DateTime, Utc};
use sea_orm::{sea_query::StringLen, DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::{TaskError, TaskResult};

/// Task lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TaskStatus {
    /// Default status for new tasks
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Task priority levels
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    #[sea_orm(string_value = "low")]
    Low,
    /// Default priority
    #[default]
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// Task entity. Field names are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a task.
///
/// Fields arrive loosely typed so that validation can answer with the
/// full list of problems instead of a deserialization error on the
/// first bad field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub title: Option<String>,
    pub user_id: Option<i64>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// A validated task payload, normalized by the service layer before it
/// reaches a repository.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
}

pub(crate) const STATUS_MESSAGE: &str =
    "Status must be one of: 'pending', 'in-progress', 'completed', 'cancelled'";
pub(crate) const PRIORITY_MESSAGE: &str = "Priority must be one of: 'low', 'medium', 'high'";

impl TaskInput {
    /// Check the payload and collect every violation.
    pub fn validate(&self) -> TaskResult<()> {
        let mut errors = Vec::new();

        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => {
                if title.len() > 200 {
                    errors.push("Title must be less than 200 characters".to_string());
                }
            }
            _ => errors.push("Title is required and must be a non-empty string".to_string()),
        }

        match self.user_id {
            None => errors.push("UserId is required".to_string()),
            Some(user_id) if user_id <= 0 => {
                errors.push("UserId must be a positive integer".to_string())
            }
            _ => {}
        }

        if let Some(status) = self.status.as_deref() {
            if status.parse::<TaskStatus>().is_err() {
                errors.push(STATUS_MESSAGE.to_string());
            }
        }

        if let Some(priority) = self.priority.as_deref() {
            if priority.parse::<TaskPriority>().is_err() {
                errors.push(PRIORITY_MESSAGE.to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TaskError::Validation(errors))
        }
    }

    /// Validate and normalize into a [`NewTask`], applying the default
    /// status and priority for omitted fields.
    pub fn into_new_task(self) -> TaskResult<NewTask> {
        self.validate()?;

        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let priority = self
            .priority
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_default();

        match (self.title, self.user_id) {
            (Some(title), Some(user_id)) => Ok(NewTask {
                user_id,
                title,
                description: self.description.unwrap_or_default(),
                status,
                priority,
                due_date: self.due_date,
            }),
            // validate() rejects missing title/userId above
            _ => Err(TaskError::Validation(vec![
                "Title is required and must be a non-empty string".to_string(),
            ])),
        }
    }
}

impl Task {
    /// Overwrite fields present in the payload; the identifier and the
    /// creation timestamp never change.
    pub fn apply_update(&mut self, input: TaskInput) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(user_id) = input.user_id {
            self.user_id = user_id;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(status) = input.status.as_deref().and_then(|s| s.parse().ok()) {
            self.status = status;
        }
        if let Some(priority) = input.priority.as_deref().and_then(|p| p.parse().ok()) {
            self.priority = priority;
        }
        if let Some(due_date) = input.due_date {
            self.due_date = Some(due_date);
        }
        self.updated_at = Utc::now();
    }
}
