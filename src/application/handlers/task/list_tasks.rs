//! ListTasksHandler - the Overseer's board of every task.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::task::{Task, TaskError};
use crate::ports::TaskRepository;

/// Query for all tasks, most recently updated first.
#[derive(Debug, Clone)]
pub struct ListTasksQuery {
    pub actor: AuthenticatedUser,
}

pub struct ListTasksHandler {
    tasks: Arc<dyn TaskRepository>,
}

impl ListTasksHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    pub async fn handle(&self, query: ListTasksQuery) -> Result<Vec<Task>, TaskError> {
        query.actor.require_role(Role::Overseer)?;
        Ok(self.tasks.list_all().await?)
    }
}
