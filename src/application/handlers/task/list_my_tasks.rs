//! ListMyTasksHandler - a Field Agent's own tasks.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::task::{Task, TaskError};
use crate::ports::TaskRepository;

/// Query for the caller's assigned tasks, most recently updated first.
#[derive(Debug, Clone)]
pub struct ListMyTasksQuery {
    pub actor: AuthenticatedUser,
}

pub struct ListMyTasksHandler {
    tasks: Arc<dyn TaskRepository>,
}

impl ListMyTasksHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    pub async fn handle(&self, query: ListMyTasksQuery) -> Result<Vec<Task>, TaskError> {
        query.actor.require_role(Role::FieldAgent)?;
        Ok(self.tasks.find_by_assignee(&query.actor.id).await?)
    }
}
