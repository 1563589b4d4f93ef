//! Task repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TaskId, UserId};
use crate::domain::task::{Task, TaskStatus};

/// Repository port for Task persistence.
///
/// A successful return means the write is committed; broadcasting happens
/// only after that.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Save a new task.
    async fn save(&self, task: &Task) -> Result<(), DomainError>;

    /// Replace a task loaded earlier, provided nobody wrote it since.
    ///
    /// The stored version must equal `task.version()`. Returns the task as
    /// stored, with its version advanced.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task doesn't exist
    /// - `Conflict` if the stored version moved on
    /// - `DatabaseError` on persistence failure
    async fn update(&self, task: &Task) -> Result<Task, DomainError>;

    /// Set the status of a task currently assigned to `assignee`, in one
    /// write. Only status, updater and `updated_at` change.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task doesn't exist
    /// - `Forbidden` if `assignee` does not hold the task
    async fn set_status(
        &self,
        id: &TaskId,
        assignee: &UserId,
        status: TaskStatus,
    ) -> Result<Task, DomainError>;

    /// Find a task by its ID. This is the snapshot lookup used for broadcasts.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError>;

    /// All tasks, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Task>, DomainError>;

    /// Tasks assigned to `assignee`, most recently updated first.
    async fn find_by_assignee(&self, assignee: &UserId) -> Result<Vec<Task>, DomainError>;

    /// Delete a task, returning the row that was removed.
    ///
    /// # Errors
    ///
    /// - `TaskNotFound` if the task doesn't exist
    async fn delete(&self, id: &TaskId) -> Result<Task, DomainError>;
}
