use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::TaskResult;
use crate::models::{NewTask, Task, TaskInput};

/// Repository trait for Task persistence.
///
/// Implementations can use different storage backends (PostgreSQL,
/// in-memory for tests).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task and return it with its assigned id
    async fn create(&self, input: NewTask) -> TaskResult<Task>;

    /// Get a task by id
    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>>;

    /// List every task
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// List the tasks belonging to a user (possibly empty)
    async fn list_by_user(&self, user_id: i64) -> TaskResult<Vec<Task>>;

    /// Apply an update payload to an existing task
    async fn update(&self, id: i64, input: TaskInput) -> TaskResult<Option<Task>>;

    /// Delete a task by id; false if it did not exist
    async fn delete(&self, id: i64) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<i64, Task>>>,
    next_id: AtomicI64,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;
        let now = chrono::Utc::now();

        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: input.user_id,
            title: input.title,
            description: input.description,
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };

        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut result: Vec<Task> = tasks.values().cloned().collect();
        result.sort_by_key(|t| t.id);
        Ok(result)
    }

    async fn list_by_user(&self, user_id: i64) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        let mut result: Vec<Task> = tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|t| t.id);
        Ok(result)
    }

    async fn update(&self, id: i64, input: TaskInput) -> TaskResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;

        let Some(task) = tasks.get_mut(&id) else {
            return Ok(None);
        };

        task.apply_update(input);

        tracing::info!(task_id = id, "Updated task");
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        if tasks.remove(&id).is_some() {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
