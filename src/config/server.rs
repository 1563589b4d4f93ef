//! HTTP listener settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::{check_range, ValidationError};

/// Longest request the timeout layer lets run.
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Deployment flavour. Production switches on JSON logs and the stricter
/// database and secret checks.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// `host:port` the listener binds
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default)]
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins. Empty allows any origin.
    #[serde(default)]
    pub allowed_origins: String,
}

impl ServerConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr, ValidationError> {
        self.listen
            .trim()
            .parse()
            .map_err(|_| ValidationError::ListenAddress(self.listen.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Configured CORS origins, blanks skipped.
    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listen_addr()?;
        check_range(
            "server.request_timeout_secs",
            self.request_timeout_secs,
            1,
            MAX_REQUEST_TIMEOUT_SECS,
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            environment: Environment::default(),
            log_filter: default_log_filter(),
            request_timeout_secs: default_request_timeout(),
            allowed_origins: String::new(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_filter() -> String {
    "info,north_command=debug,sqlx=warn,tower_http=info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
