//! DeleteTaskHandler - Overseer removes a task.

use std::sync::Arc;

use crate::application::handlers::fanout::RealtimeFanout;
use crate::domain::foundation::{AuthenticatedUser, Role, TaskId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::task::{Task, TaskError};
use crate::ports::{TaskChange, TaskRepository};

/// Command to delete a task.
#[derive(Debug, Clone)]
pub struct DeleteTaskCommand {
    pub actor: AuthenticatedUser,
    pub task_id: TaskId,
}

/// Result of a successful delete.
#[derive(Debug, Clone)]
pub struct DeleteTaskResult {
    /// State just before deletion.
    pub task: Task,
    pub notifications: Vec<Notification>,
}

/// Handler for deleting tasks.
pub struct DeleteTaskHandler {
    tasks: Arc<dyn TaskRepository>,
    fanout: Arc<RealtimeFanout>,
}

impl DeleteTaskHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>, fanout: Arc<RealtimeFanout>) -> Self {
        Self { tasks, fanout }
    }

    pub async fn handle(&self, cmd: DeleteTaskCommand) -> Result<DeleteTaskResult, TaskError> {
        cmd.actor.require_role(Role::Overseer)?;

        // the removed row names the assignee at the moment of deletion
        let task = self
            .tasks
            .delete(&cmd.task_id)
            .await
            .map_err(TaskError::for_task(cmd.task_id))?;

        let drafts: Vec<NotificationDraft> = task
            .assignee()
            .map(|assignee| NotificationDraft::task_deleted(assignee.clone(), &task))
            .into_iter()
            .collect();
        let notifications = self
            .fanout
            .after_task_commit(
                *task.id(),
                TaskChange::Deleted {
                    last_snapshot: task.clone(),
                },
                drafts,
            )
            .await;

        tracing::info!(task_id = %task.id(), "Task deleted");
        Ok(DeleteTaskResult {
            task,
            notifications,
        })
    }
}
