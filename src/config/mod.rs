//! Application configuration module
//!
//! Loads type-safe configuration from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `NORTH_COMMAND` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use north_command::config::AppConfig;
//!
//! # fn main() -> Result<(), north_command::config::ConfigError> {
//! let config = AppConfig::load()?;
//! config.validate()?;
//!
//! println!("Listening on {}", config.server.listen_addr()?);
//! # Ok(())
//! # }
//! ```

mod auth;
mod database;
mod error;
mod realtime;
mod server;

pub use auth::{AuthConfig, MIN_PRODUCTION_SECRET_LEN};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use realtime::RealtimeConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, environment and HTTP layer settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration; empty URL runs on in-memory stores
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Session token verification
    pub auth: AuthConfig,

    /// WebSocket session settings
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `NORTH_COMMAND__*` variables:
    ///
    /// - `NORTH_COMMAND__SERVER__LISTEN=127.0.0.1:3000` -> `server.listen`
    /// - `NORTH_COMMAND__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NORTH_COMMAND")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate(self.server.environment)?;
        self.auth.validate(self.server.environment)?;
        self.realtime.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
