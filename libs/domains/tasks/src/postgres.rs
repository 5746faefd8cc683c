use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::TaskResult,
    models::{NewTask, Task, TaskInput},
    repository::TaskRepository,
};

/// PostgreSQL-backed task repository. The connection handle is injected
/// at construction and shared with the rest of the process.
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn list_by_user(&self, user_id: i64) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, input: TaskInput) -> TaskResult<Option<Task>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut task: Task = model.into();
        task.apply_update(input);

        let active_model = entity::ActiveModel {
            id: Set(task.id),
            user_id: Set(task.user_id),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            status: Set(task.status),
            priority: Set(task.priority),
            due_date: Set(task.due_date.map(Into::into)),
            created_at: Set(task.created_at.into()),
            updated_at: Set(task.updated_at.into()),
        };

        let updated = active_model.update(&self.db).await?;

        tracing::info!(task_id = id, "Updated task");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
