use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskInput};
use crate::repository::TaskRepository;

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input))]
    pub async fn create_task(&self, input: TaskInput) -> TaskResult<Task> {
        let draft = input.into_new_task()?;
        self.repository.create(draft).await
    }

    /// Get a task by id
    #[instrument(skip(self))]
    pub async fn get_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// List every task
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// List the tasks belonging to a user; an empty list is a success
    #[instrument(skip(self))]
    pub async fn tasks_for_user(&self, user_id: i64) -> TaskResult<Vec<Task>> {
        self.repository.list_by_user(user_id).await
    }

    /// Replace a task's fields from a validated payload
    #[instrument(skip(self, input))]
    pub async fn update_task(&self, id: i64, input: TaskInput) -> TaskResult<Task> {
        input.validate()?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Delete a task
    #[instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}
