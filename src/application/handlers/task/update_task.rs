//! UpdateTaskHandler - Overseer applies a partial update to any task.

use std::sync::Arc;

use crate::application::handlers::fanout::RealtimeFanout;
use crate::domain::foundation::{AuthenticatedUser, ErrorCode, Role, TaskId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::task::{PatchOutcome, Task, TaskError, TaskPatch};
use crate::ports::{TaskChange, TaskRepository};

/// Command to patch a task.
#[derive(Debug, Clone)]
pub struct UpdateTaskCommand {
    pub actor: AuthenticatedUser,
    pub task_id: TaskId,
    pub patch: TaskPatch,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateTaskResult {
    pub task: Task,
    pub notifications: Vec<Notification>,
}

/// Attempts at applying a patch before giving up with `Conflict`.
const MAX_PATCH_ATTEMPTS: usize = 3;

/// Handler for Overseer task edits.
///
/// The patch is applied to a freshly loaded task and written back under a
/// version check. If another write landed in between, the patch is applied
/// again to the newer state, so only the fields the Overseer sent change.
pub struct UpdateTaskHandler {
    tasks: Arc<dyn TaskRepository>,
    fanout: Arc<RealtimeFanout>,
}

impl UpdateTaskHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>, fanout: Arc<RealtimeFanout>) -> Self {
        Self { tasks, fanout }
    }

    pub async fn handle(&self, cmd: UpdateTaskCommand) -> Result<UpdateTaskResult, TaskError> {
        cmd.actor.require_role(Role::Overseer)?;

        let mut attempt = 1;
        let (task, outcome) = loop {
            let mut task = self
                .tasks
                .find_by_id(&cmd.task_id)
                .await?
                .ok_or(TaskError::NotFound(cmd.task_id))?;

            let outcome = task.apply_patch(cmd.patch.clone(), &cmd.actor.id)?;
            match self.tasks.update(&task).await {
                Ok(stored) => break (stored, outcome),
                Err(e) if e.code == ErrorCode::Conflict && attempt < MAX_PATCH_ATTEMPTS => {
                    tracing::debug!(task_id = %cmd.task_id, attempt, "Task changed during edit, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(TaskError::for_task(cmd.task_id)(e)),
            }
        };

        let drafts = derive_notifications(&task, &outcome);
        let notifications = self
            .fanout
            .after_task_commit(*task.id(), TaskChange::Upserted, drafts)
            .await;

        tracing::info!(task_id = %task.id(), status = %task.status(), "Task updated");
        Ok(UpdateTaskResult {
            task,
            notifications,
        })
    }
}

/// New assignee first, then one update for every impacted identity.
fn derive_notifications(task: &Task, outcome: &PatchOutcome) -> Vec<NotificationDraft> {
    let mut drafts = Vec::new();
    if let Some(assignee) = outcome.newly_assigned() {
        drafts.push(NotificationDraft::reassigned(assignee.clone(), task));
    }
    for target in outcome.impacted() {
        drafts.push(NotificationDraft::task_edited(target, task, outcome.status_set));
    }
    drafts
}
