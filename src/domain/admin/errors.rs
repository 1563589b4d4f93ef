//! Admin-specific error types.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, UserId};

/// Admin-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Caller is not the Overseer.
    Forbidden,
    /// No Field Agent has this id.
    AgentNotFound(UserId),
    /// Persistence failed.
    Infrastructure(String),
}

impl AdminError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::Forbidden => ErrorCode::Forbidden,
            AdminError::AgentNotFound(_) => ErrorCode::UserNotFound,
            AdminError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AdminError::Forbidden => "Permission denied".to_string(),
            AdminError::AgentNotFound(id) => format!("Field Agent not found: {}", id),
            AdminError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdminError {}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        AdminError::Infrastructure(err.to_string())
    }
}

impl From<AuthError> for AdminError {
    fn from(_: AuthError) -> Self {
        AdminError::Forbidden
    }
}
