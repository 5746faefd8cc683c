use core_config::{
    app_info, database::PostgresConfig, env_or_default, server::ServerConfig, AppInfo,
    Environment, FromEnv,
};

/// Users service configuration, composed from the shared config
/// components plus the one setting this service owns: the Tasks
/// service base address for the cross-service task fetch.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub tasks_service_url: String,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env_with_default_port(3002)?;
        let tasks_service_url = env_or_default("TASKS_SERVICE_URL", "http://localhost:3001");

        Ok(Self {
            app: app_info!(),
            database,
            server,
            tasks_service_url,
            environment,
        })
    }
}
