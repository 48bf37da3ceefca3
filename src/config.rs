use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const CONFIG_DIR: &str = "config";

/// Application configuration, layered from `config/default.toml`, an
/// environment-specific file and `APP__`-prefixed environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Database connection URL (postgres:// or sqlite://).
    pub database_url: String,

    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Application environment.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Logging level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging).
    #[serde(default)]
    pub log_json: bool,

    /// Whether to run database migrations on startup.
    #[serde(default)]
    pub auto_migrate: bool,

    /// Whether to insert the demo fixture on an empty database.
    #[serde(default)]
    pub seed_demo_data: bool,

    /// Comma-separated list of allowed CORS origins; permissive when unset.
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,

    /// Maximum database pool connections.
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    /// Minimum database pool connections.
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,
}

impl AppConfig {
    /// Minimal configuration for a given database, used by binaries and the
    /// integration test harness.
    pub fn new(database_url: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: default_host(),
            port: default_port(),
            environment: environment.into(),
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: false,
            seed_demo_data: false,
            cors_allowed_origins: None,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_environment() -> String {
    DEFAULT_ENV.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_db_min_connections() -> u32 {
    1
}

/// Loads configuration for the current `APP_ENV`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let environment = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());

    Config::builder()
        .add_source(File::with_name(&format!("{CONFIG_DIR}/default")).required(false))
        .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// configured level when set.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_directive = format!("mro_api={level},tower_http={level}");
    let directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter = EnvFilter::new(directive);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_combines_host_and_port() {
        let mut cfg = AppConfig::new("sqlite::memory:", "test");
        cfg.host = "127.0.0.1".to_string();
        cfg.port = 9090;
        assert_eq!(cfg.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn environment_helpers() {
        assert!(AppConfig::new("sqlite::memory:", "development").is_development());
        assert!(!AppConfig::new("sqlite::memory:", "production").is_development());
    }
}
