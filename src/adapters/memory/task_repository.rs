//! In-memory task repository.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, TaskId, UserId};
use crate::domain::task::{Task, TaskStatus};
use crate::ports::TaskRepository;

/// In-memory storage for tasks
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `DatabaseError` (for tests).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored tasks
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("task store unavailable"));
        }
        Ok(())
    }
}

fn not_found(id: &TaskId) -> DomainError {
    DomainError::new(ErrorCode::TaskNotFound, format!("Task not found: {}", id))
}

fn newest_first(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn save(&self, task: &Task) -> Result<(), DomainError> {
        self.check_writable()?;
        self.tasks.write().await.insert(*task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        self.check_writable()?;
        let mut tasks = self.tasks.write().await;
        let stored = tasks.get_mut(task.id()).ok_or_else(|| not_found(task.id()))?;
        if stored.version() != task.version() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Task {} changed since it was loaded", task.id()),
            ));
        }
        *stored = task.clone().committed();
        Ok(stored.clone())
    }

    async fn set_status(
        &self,
        id: &TaskId,
        assignee: &UserId,
        status: TaskStatus,
    ) -> Result<Task, DomainError> {
        self.check_writable()?;
        let mut tasks = self.tasks.write().await;
        let stored = tasks.get_mut(id).ok_or_else(|| not_found(id))?;
        if !stored.is_assigned_to(assignee) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Task {} is not assigned to {}", id, assignee),
            ));
        }
        let mut next = stored.clone();
        next.set_status(status, assignee)?;
        *stored = next.committed();
        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Task>, DomainError> {
        let tasks = self.tasks.read().await.values().cloned().collect();
        Ok(newest_first(tasks))
    }

    async fn find_by_assignee(&self, assignee: &UserId) -> Result<Vec<Task>, DomainError> {
        let tasks = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.is_assigned_to(assignee))
            .cloned()
            .collect();
        Ok(newest_first(tasks))
    }

    async fn delete(&self, id: &TaskId) -> Result<Task, DomainError> {
        self.check_writable()?;
        self.tasks
            .write()
            .await
            .remove(id)
            .ok_or_else(|| not_found(id))
    }
}
