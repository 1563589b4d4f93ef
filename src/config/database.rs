//! Store selection and PostgreSQL pool settings

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::{check_range, ValidationError};
use super::server::Environment;

const MAX_POOL_SIZE: u64 = 100;

/// Without a `url` the server keeps everything in memory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; may embed a password
    #[serde(default)]
    pub url: Option<SecretString>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply `migrations/` before serving
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// The connection string, if one is set and non-blank.
    pub fn connection_url(&self) -> Option<&str> {
        self.url
            .as_ref()
            .map(|url| url.expose_secret().trim())
            .filter(|url| !url.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.connection_url().is_some()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Production refuses to run on the in-memory stores.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let Some(url) = self.connection_url() else {
            return if environment.is_production() {
                Err(ValidationError::Missing("database.url"))
            } else {
                Ok(())
            };
        };
        if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
            return Err(ValidationError::DatabaseScheme);
        }
        check_range(
            "database.max_connections",
            u64::from(self.max_connections),
            1,
            MAX_POOL_SIZE,
        )
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}
