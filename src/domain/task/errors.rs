//! Task-specific error types.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, TaskId, ValidationError};

/// Task-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task was not found.
    NotFound(TaskId),
    /// Caller's role or ownership does not permit the operation.
    Forbidden,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// The task kept changing underneath the edit.
    Conflict(TaskId),
    /// Persistence failed; the mutation did not happen.
    Infrastructure(String),
}

impl TaskError {
    pub fn not_found(id: TaskId) -> Self {
        TaskError::NotFound(id)
    }
    pub fn forbidden() -> Self {
        TaskError::Forbidden
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TaskError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        TaskError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            TaskError::NotFound(_) => ErrorCode::TaskNotFound,
            TaskError::Forbidden => ErrorCode::Forbidden,
            TaskError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            TaskError::Conflict(_) => ErrorCode::Conflict,
            TaskError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            TaskError::NotFound(id) => format!("Task not found: {}", id),
            TaskError::Forbidden => "Permission denied".to_string(),
            TaskError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            TaskError::Conflict(id) => format!("Task was modified concurrently: {}", id),
            TaskError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for TaskError {}

impl TaskError {
    /// Convert a port error for an operation on `id`, keeping not-found
    /// and conflict outcomes distinct from infrastructure failures.
    pub fn for_task(id: TaskId) -> impl Fn(DomainError) -> TaskError {
        move |err| match err.code {
            ErrorCode::TaskNotFound => TaskError::NotFound(id),
            ErrorCode::Conflict => TaskError::Conflict(id),
            _ => err.into(),
        }
    }
}

impl From<DomainError> for TaskError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => TaskError::Forbidden,
            ErrorCode::ValidationFailed | ErrorCode::InvalidStateTransition => {
                TaskError::ValidationFailed {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            _ => TaskError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for TaskError {
    fn from(err: ValidationError) -> Self {
        TaskError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<AuthError> for TaskError {
    fn from(_: AuthError) -> Self {
        TaskError::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_failure_maps_to_infrastructure() {
        let err: TaskError = DomainError::database("connection reset").into();
        assert!(matches!(err, TaskError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn validation_error_keeps_field_name() {
        let err: TaskError = ValidationError::empty_field("title").into();
        assert_eq!(
            err,
            TaskError::ValidationFailed {
                field: "title".to_string(),
                message: "Field 'title' cannot be empty".to_string(),
            }
        );
    }

    #[test]
    fn port_errors_for_a_task_keep_their_meaning() {
        let id = TaskId::new();
        let to_task_error = TaskError::for_task(id);

        let missing = DomainError::new(ErrorCode::TaskNotFound, "gone");
        assert_eq!(to_task_error(missing), TaskError::NotFound(id));

        let raced = DomainError::new(ErrorCode::Conflict, "stale version");
        assert_eq!(to_task_error(raced), TaskError::Conflict(id));

        let denied = DomainError::new(ErrorCode::Forbidden, "not the assignee");
        assert_eq!(to_task_error(denied), TaskError::Forbidden);
    }

    #[test]
    fn role_failure_is_forbidden() {
        let err: TaskError = AuthError::InsufficientPermissions.into();
        assert_eq!(err, TaskError::Forbidden);
    }
}
