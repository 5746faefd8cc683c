//! Task statistics aggregation: pure counting over a fetched task
//! list, computed fresh per request and never stored.

use serde::Serialize;
use strum::EnumString;
use utoipa::ToSchema;

use crate::tasks_client::RemoteTask;

// The users side parses the peer service's enums leniently: a value
// outside these sets counts toward `total` but lands in no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Counts per status bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: usize,
    #[serde(rename = "in-progress")]
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Counts per priority bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Statistics over one user's task list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct TaskStatistics {
    pub total: usize,
    #[serde(rename = "byStatus")]
    pub by_status: StatusCounts,
    #[serde(rename = "byPriority")]
    pub by_priority: PriorityCounts,
}

/// Count tasks by status and by priority.
///
/// `total` is always the input length. Tasks whose status or priority
/// falls outside the enumerated sets contribute to no bucket; this is
/// a defined non-failing case, not a validation concern here.
pub fn compute_statistics(tasks: &[RemoteTask]) -> TaskStatistics {
    let mut by_status = StatusCounts::default();
    let mut by_priority = PriorityCounts::default();

    for task in tasks {
        if let Ok(status) = task.status.parse::<TaskStatus>() {
            match status {
                TaskStatus::Pending => by_status.pending += 1,
                TaskStatus::InProgress => by_status.in_progress += 1,
                TaskStatus::Completed => by_status.completed += 1,
                TaskStatus::Cancelled => by_status.cancelled += 1,
            }
        }

        if let Ok(priority) = task.priority.parse::<TaskPriority>() {
            match priority {
                TaskPriority::Low => by_priority.low += 1,
                TaskPriority::Medium => by_priority.medium += 1,
                TaskPriority::High => by_priority.high += 1,
            }
        }
    }

    TaskStatistics {
        total: tasks.len(),
        by_status,
        by_priority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(status: &str, priority: &str) -> RemoteTask {
        let now = Utc::now();
        RemoteTask {
            id: 1,
            user_id: 1,
            title: "task".to_string(),
            description: String::new(),
            status: status.to_string(),
            priority: priority.to_string(),
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn status_sum(stats: &TaskStatistics) -> usize {
        stats.by_status.pending
            + stats.by_status.in_progress
            + stats.by_status.completed
            + stats.by_status.cancelled
    }

    fn priority_sum(stats: &TaskStatistics) -> usize {
        stats.by_priority.high + stats.by_priority.medium + stats.by_priority.low
    }

    #[test]
    fn test_empty_list_yields_all_zeroes() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.by_status, StatusCounts::default());
        assert_eq!(stats.by_priority, PriorityCounts::default());
    }

    #[test]
    fn test_counts_match_reference_scenario() {
        // three tasks: [pending, completed, completed] x [high, low, low]
        let tasks = vec![
            task("pending", "high"),
            task("completed", "low"),
            task("completed", "low"),
        ];

        let stats = compute_statistics(&tasks);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.pending, 1);
        assert_eq!(stats.by_status.completed, 2);
        assert_eq!(stats.by_status.in_progress, 0);
        assert_eq!(stats.by_status.cancelled, 0);
        assert_eq!(stats.by_priority.high, 1);
        assert_eq!(stats.by_priority.low, 2);
        assert_eq!(stats.by_priority.medium, 0);
    }

    #[test]
    fn test_bucket_sums_equal_total_for_known_values() {
        let tasks = vec![
            task("pending", "low"),
            task("in-progress", "medium"),
            task("completed", "high"),
            task("cancelled", "high"),
        ];

        let stats = compute_statistics(&tasks);

        assert_eq!(stats.total, 4);
        assert_eq!(status_sum(&stats), stats.total);
        assert_eq!(priority_sum(&stats), stats.total);
    }

    #[test]
    fn test_unknown_values_count_only_toward_total() {
        let tasks = vec![task("archived", "urgent"), task("pending", "low")];

        let stats = compute_statistics(&tasks);

        assert_eq!(stats.total, 2);
        assert_eq!(status_sum(&stats), 1);
        assert_eq!(priority_sum(&stats), 1);
    }

    #[test]
    fn test_serializes_with_wire_key_names() {
        let stats = compute_statistics(&[task("in-progress", "high")]);
        let body = serde_json::to_value(&stats).unwrap();

        assert_eq!(body["total"], 1);
        assert_eq!(body["byStatus"]["in-progress"], 1);
        assert_eq!(body["byStatus"]["pending"], 0);
        assert_eq!(body["byPriority"]["high"], 1);
    }
}
