use std::env;
use std::fmt;
use std::time::Duration;

use config::builder::DefaultState;
use config::Config as RawConfig;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Upper bound on the time spent handling one request
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    /// Required when `storage.backend` is `postgres`
    pub url: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: u32,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (port 8080, 15 second requests, 24 hour sessions,
    ///    postgres storage)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = Self::with_defaults(RawConfig::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"));

        builder.build()?.try_deserialize()
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        builder
            .set_default("server.http_port", 8080_i64)?
            .set_default("server.request_timeout_secs", 15_i64)?
            .set_default("jwt.expiration_hours", 24_i64)?
            .set_default("storage.backend", "postgres")
    }
}
