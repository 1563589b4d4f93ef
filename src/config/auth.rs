//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Shortest HS256 secret accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Session token verification settings (HS256 JWT)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used to verify session tokens
    pub jwt_secret: SecretString,

    /// Expected `iss` claim, if tokens carry one
    #[serde(default)]
    pub issuer: Option<String>,

    /// Clock skew tolerance for `exp` in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production rejects short secrets.
    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.trim().is_empty() {
            return Err(ValidationError::Missing("auth.jwt_secret"));
        }
        if environment.is_production() && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakSecret {
                min: MIN_PRODUCTION_SECRET_LEN,
                actual: secret.len(),
            });
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}
