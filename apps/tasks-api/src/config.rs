use core_config::{
    app_info, database::PostgresConfig, server::ServerConfig, AppInfo, Environment, FromEnv,
};

/// Tasks service configuration, composed from the shared config
/// components.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env_with_default_port(3001)?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
        })
    }
}
