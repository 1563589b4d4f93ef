//! Chat-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Chat-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The peer identity does not exist.
    UserNotFound(UserId),
    /// No Overseer account is registered.
    OverseerMissing,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Persistence failed.
    Infrastructure(String),
}

impl ChatError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatError::UserNotFound(_) => ErrorCode::UserNotFound,
            ChatError::OverseerMissing => ErrorCode::InternalError,
            ChatError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ChatError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ChatError::UserNotFound(id) => format!("User not found: {}", id),
            ChatError::OverseerMissing => "Overseer not found".to_string(),
            ChatError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ChatError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ChatError {}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::Infrastructure(err.to_string())
    }
}

impl From<ValidationError> for ChatError {
    fn from(err: ValidationError) -> Self {
        ChatError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
