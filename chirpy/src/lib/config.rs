use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Platform value that enables destructive administrative endpoints.
pub const DEV_PLATFORM: &str = "dev";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
    pub platform: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Third-party payment provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub api_key: String,
}

/// Run mode used when `RUN_MODE` is unset. Never loads a dev-platform file.
const DEFAULT_RUN_MODE: &str = "production";

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, POLKA__API_KEY, PLATFORM, etc.)
    /// 2. Run-mode config file (config/{RUN_MODE}.toml, `production` by default)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// * Sources fail to parse or deserialize
    /// * `jwt.secret` or `polka.api_key` is left empty
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| DEFAULT_RUN_MODE.to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Refuse credentials that were never filled in.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set (JWT__SECRET)".to_string(),
            ));
        }
        if self.polka.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "polka.api_key must be set (POLKA__API_KEY)".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the destructive reset endpoint is available.
    pub fn is_dev_platform(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}
