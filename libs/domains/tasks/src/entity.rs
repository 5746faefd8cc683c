use crate::models::{TaskPriority, TaskStatus};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

/// Sea-ORM entity for the tasks table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            status: model.status,
            priority: model.priority,
            due_date: model.due_date.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// The id stays NotSet so the store assigns it on insert
impl From<crate::models::NewTask> for ActiveModel {
    fn from(input: crate::models::NewTask) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            user_id: Set(input.user_id),
            title: Set(input.title),
            description: Set(input.description),
            status: Set(input.status),
            priority: Set(input.priority),
            due_date: Set(input.due_date.map(Into::into)),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
