use core_config::{app_info, cors::CorsConfig, server::ServerConfig, AppInfo, FromEnv};

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let cors = CorsConfig::from_env()?; // Unset means any origin

        Ok(Self {
            app: app_info!(),
            server,
            cors,
            environment,
        })
    }
}
