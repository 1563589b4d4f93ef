//! Authentication types for the domain layer.
//!
//! These types represent a verified identity extracted from a credential.
//! They have **no external dependencies** - any verifier can populate them
//! via the `SessionValidator` port.
//!
//! Two roles exist. The Overseer is the privileged role with visibility
//! over every task and every notification; Field Agents are scoped to
//! their own tasks and direct messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::UserId;

/// Role carried in the verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Privileged administrator.
    Overseer,
    /// Standard worker.
    FieldAgent,
}

impl Role {
    /// Returns true for the privileged role.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Overseer)
    }

    /// Wire representation (`OVERSEER` / `FIELD_AGENT`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Overseer => "OVERSEER",
            Role::FieldAgent => "FIELD_AGENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OVERSEER" => Ok(Role::Overseer),
            "FIELD_AGENT" => Ok(Role::FieldAgent),
            _ => Err(AuthError::InvalidToken),
        }
    }
}

/// Identity extracted from a validated credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Stable identity (token subject).
    pub id: UserId,

    /// Role granted by the credential.
    pub role: Role,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns true if this user holds the privileged role.
    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }

    /// Fails with `InsufficientPermissions` unless the user holds `role`.
    pub fn require_role(&self, role: Role) -> Result<(), AuthError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions)
        }
    }
}

/// Authentication errors that can occur during credential validation.
///
/// Any variant other than `ServiceUnavailable` means the connection or
/// request is refused outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential was presented.
    #[error("Missing credential")]
    MissingToken,

    /// The token is malformed or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// Identity is valid but lacks the role required for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The verifier could not complete (configuration, key material, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired
        )
    }
}
