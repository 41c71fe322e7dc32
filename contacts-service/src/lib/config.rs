use std::env;

use auth::Algorithm;
use auth::AuthConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub kafka: KafkaConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub email_token_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    /// Public base URL used to build confirmation links
    pub confirmation_base_url: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

impl JwtConfig {
    /// Build the token settings handed to the authenticator.
    ///
    /// # Errors
    /// * `Message` - Algorithm name is not recognised
    pub fn auth_config(&self) -> Result<AuthConfig, ConfigError> {
        let algorithm: Algorithm = self.algorithm.parse().map_err(|_| {
            ConfigError::Message(format!("Unknown JWT algorithm: {}", self.algorithm))
        })?;

        Ok(AuthConfig::new(self.secret.clone())
            .with_algorithm(algorithm)
            .with_access_token_ttl(chrono::Duration::minutes(self.access_token_minutes))
            .with_refresh_token_ttl(chrono::Duration::days(self.refresh_token_days))
            .with_email_token_ttl(chrono::Duration::days(self.email_token_days)))
    }
}
