use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

pub use catalog_common::config::StorageConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub allow_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base used for image URLs instead of the request's scheme and host,
    /// e.g. "https://cdn.example.com".
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load defaults, then `config/config.toml` (or `$CATALOG_CONFIG`), then
    /// `CATALOG__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        Self::defaults()?
            .add_source(File::with_name(&config_path).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("database.url", "sqlite://./catalog.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("storage.upload_dir", "./uploaded_files")
    }
}

/// Environment overrides, e.g. `CATALOG__SERVER__PORT=9000`.
fn environment() -> Environment {
    Environment::with_prefix("CATALOG")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("server.cors.allow_origins")
        .try_parsing(true)
}
