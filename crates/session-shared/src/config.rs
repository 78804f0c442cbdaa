//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::constants::{DEFAULT_SESSION_TTL, PRODUCTION_ENV, SESSION_ID_FIELD};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    pub app: AppSettings,
    #[validate(nested)]
    pub redis: RedisSettings,
    #[validate(nested)]
    pub session: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Which key-value client talks to the store
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Redis commands over HTTPS (Upstash-style REST endpoint)
    #[default]
    Rest,
    /// Native Redis protocol
    Native,
    /// Process-local map, for development and tests
    Memory,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RedisSettings {
    #[validate(length(min = 1, message = "redis.url is required"))]
    pub url: String,
    #[validate(length(min = 1, message = "redis.token is required"))]
    pub token: String,
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct SessionSettings {
    /// Seconds before a written session expires
    pub ttl: i64,
    /// User fields copied into the session record
    #[serde(alias = "sessionFields", alias = "sessionfields", alias = "session_fields")]
    #[validate(custom(function = "validate_payload_fields"))]
    pub payload: Vec<String>,
    /// Overrides the production check for the cookie `Secure` flag
    #[serde(default)]
    pub secure_cookies: Option<bool>,
}

#[allow(clippy::ptr_arg)]
fn validate_payload_fields(fields: &Vec<String>) -> Result<(), ValidationError> {
    if fields.iter().any(|f| f == SESSION_ID_FIELD) {
        Ok(())
    } else {
        Err(ValidationError::new("missing_id_field")
            .with_message("session payload must include \"id\"".into()))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", env.as_str())?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "session-server")?
            .set_default("redis.backend", "rest")?
            .set_default("session.ttl", DEFAULT_SESSION_TTL)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("session.payload")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_config(config)
    }

    /// Deserializes and validates an already-built configuration.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn is_production(&self) -> bool {
        self.app.env == PRODUCTION_ENV
    }

    /// Cookie `Secure` flag: explicit setting first, otherwise production only.
    pub fn secure_cookies(&self) -> bool {
        self.session.secure_cookies.unwrap_or_else(|| self.is_production())
    }
}
