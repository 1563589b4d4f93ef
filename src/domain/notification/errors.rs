//! Notification-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId};

/// Notification-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// No notification with this id belongs to the caller.
    NotFound(NotificationId),
    /// Persistence failed.
    Infrastructure(String),
}

impl NotificationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NotificationError::NotFound(_) => ErrorCode::NotificationNotFound,
            NotificationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            NotificationError::NotFound(id) => format!("Notification not found: {}", id),
            NotificationError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for NotificationError {}

impl From<DomainError> for NotificationError {
    fn from(err: DomainError) -> Self {
        NotificationError::Infrastructure(err.to_string())
    }
}
