//! Embedded schema migrations for the tasks store

use sea_orm_migration::prelude::*;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_tasks::Migration)]
    }
}

mod m20250101_000001_create_tasks {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tasks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Tasks::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Tasks::UserId).big_integer().not_null())
                        .col(ColumnDef::new(Tasks::Title).string().not_null())
                        .col(
                            ColumnDef::new(Tasks::Description)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Tasks::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(
                            ColumnDef::new(Tasks::Priority)
                                .string()
                                .not_null()
                                .default("medium"),
                        )
                        .col(ColumnDef::new(Tasks::DueDate).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(Tasks::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Tasks::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            // find-by-user is the hot path, consumed cross-service
            manager
                .create_index(
                    Index::create()
                        .name("tasks_user_id_idx")
                        .table(Tasks::Table)
                        .col(Tasks::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Tasks::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    pub enum Tasks {
        Table,
        Id,
        UserId,
        Title,
        Description,
        Status,
        Priority,
        DueDate,
        CreatedAt,
        UpdatedAt,
    }
}
