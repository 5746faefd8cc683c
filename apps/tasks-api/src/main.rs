use axum::Router;
use axum_helpers::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_tasks::{handlers, PgTaskRepository, TaskService};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre before any fallible operation
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    // Connection handle is created here, injected into the repository,
    // and closed in the shutdown cleanup below.
    let db = sea_orm::Database::connect(config.database.clone().into_connect_options()).await?;
    domain_tasks::migration::Migrator::up(&db, None).await?;
    info!("Connected to PostgreSQL and applied migrations");

    let repository = PgTaskRepository::new(db.clone());
    let service = TaskService::new(repository);

    let api_routes = Router::new().nest("/tasks", handlers::router(service));

    let app = create_router::<handlers::ApiDoc>(api_routes).merge(health_router(config.app));

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await?;

    info!("Tasks service shutdown complete");
    Ok(())
}
