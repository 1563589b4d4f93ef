//! UpdateMyTaskStatusHandler - a Field Agent moves their own task.

use std::sync::Arc;

use crate::application::handlers::fanout::RealtimeFanout;
use crate::domain::foundation::{AuthenticatedUser, Role, TaskId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::task::{Task, TaskError, TaskStatus};
use crate::ports::{TaskChange, TaskRepository};

/// Command to set the status of the caller's own task.
#[derive(Debug, Clone)]
pub struct UpdateMyTaskStatusCommand {
    pub actor: AuthenticatedUser,
    pub task_id: TaskId,
    pub status: TaskStatus,
}

/// Result of a successful status change.
#[derive(Debug, Clone)]
pub struct UpdateMyTaskStatusResult {
    pub task: Task,
    pub notifications: Vec<Notification>,
}

/// Handler for Field Agent status updates.
pub struct UpdateMyTaskStatusHandler {
    tasks: Arc<dyn TaskRepository>,
    fanout: Arc<RealtimeFanout>,
}

impl UpdateMyTaskStatusHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>, fanout: Arc<RealtimeFanout>) -> Self {
        Self { tasks, fanout }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMyTaskStatusCommand,
    ) -> Result<UpdateMyTaskStatusResult, TaskError> {
        cmd.actor.require_role(Role::FieldAgent)?;

        // ownership is checked by the same write that changes the status
        let task = self
            .tasks
            .set_status(&cmd.task_id, &cmd.actor.id, cmd.status)
            .await
            .map_err(TaskError::for_task(cmd.task_id))?;

        let drafts = vec![NotificationDraft::own_status_changed(
            cmd.actor.id.clone(),
            &task,
        )];
        let notifications = self
            .fanout
            .after_task_commit(*task.id(), TaskChange::Upserted, drafts)
            .await;

        tracing::info!(task_id = %task.id(), user_id = %cmd.actor.id, status = %task.status(), "Task status updated by assignee");
        Ok(UpdateMyTaskStatusResult {
            task,
            notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryNotificationRepository, InMemoryTaskRepository};
    use crate::application::handlers::test_support::{
        agent, open_task, overseer, RecordingBroadcaster,
    };
    use crate::application::handlers::task::{UpdateTaskCommand, UpdateTaskHandler};
    use crate::domain::foundation::UserId;
    use crate::domain::notification::NotificationType;
    use crate::domain::task::TaskPatch;

    fn fixture() -> (
        Arc<InMemoryTaskRepository>,
        Arc<RecordingBroadcaster>,
        UpdateMyTaskStatusHandler,
    ) {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let fanout = Arc::new(RealtimeFanout::new(
            Arc::new(InMemoryNotificationRepository::new()),
            broadcaster.clone(),
        ));
        (
            tasks.clone(),
            broadcaster,
            UpdateMyTaskStatusHandler::new(tasks, fanout),
        )
    }

    #[tokio::test]
    async fn assignee_moves_task_and_is_notified() {
        let (tasks, broadcaster, handler) = fixture();
        let task = open_task("Tune bells", Some("agent-42"));
        tasks.save(&task).await.unwrap();

        let result = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: agent("agent-42"),
                task_id: *task.id(),
                status: TaskStatus::InProgress,
            })
            .await
            .unwrap();

        assert_eq!(result.task.status(), TaskStatus::InProgress);
        assert_eq!(result.task.updated_by().as_str(), "agent-42");
        let n = &result.notifications[0];
        assert_eq!(n.kind(), NotificationType::StatusChanged);
        assert_eq!(n.target().as_str(), "agent-42");
        assert_eq!(n.message(), "Status updated to IN_PROGRESS: Tune bells");
        assert_eq!(broadcaster.calls().len(), 2);
    }

    #[tokio::test]
    async fn reset_to_open_is_allowed() {
        let (tasks, _broadcaster, handler) = fixture();
        let mut task = open_task("Tune bells", Some("agent-42"));
        let assignee = agent("agent-42").id;
        task.set_status(TaskStatus::Completed, &assignee).unwrap();
        tasks.save(&task).await.unwrap();

        let result = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: agent("agent-42"),
                task_id: *task.id(),
                status: TaskStatus::Open,
            })
            .await
            .unwrap();
        assert_eq!(result.task.status(), TaskStatus::Open);
    }

    #[tokio::test]
    async fn other_agents_task_is_forbidden() {
        let (tasks, broadcaster, handler) = fixture();
        let task = open_task("Tune bells", Some("agent-7"));
        tasks.save(&task).await.unwrap();

        let err = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: agent("agent-42"),
                task_id: *task.id(),
                status: TaskStatus::Completed,
            })
            .await
            .unwrap_err();

        assert_eq!(err, TaskError::Forbidden);
        assert!(broadcaster.calls().is_empty());
        let stored = tasks.find_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), TaskStatus::Open);
    }

    #[tokio::test]
    async fn overseer_uses_the_edit_path_instead() {
        let (tasks, _broadcaster, handler) = fixture();
        let task = open_task("Tune bells", Some("agent-42"));
        tasks.save(&task).await.unwrap();

        let err = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: overseer(),
                task_id: *task.id(),
                status: TaskStatus::Completed,
            })
            .await
            .unwrap_err();
        assert_eq!(err, TaskError::Forbidden);
    }

    #[tokio::test]
    async fn missing_task_is_not_found() {
        let (_tasks, broadcaster, handler) = fixture();
        let id = TaskId::new();
        let err = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: agent("agent-42"),
                task_id: id,
                status: TaskStatus::Completed,
            })
            .await
            .unwrap_err();
        assert_eq!(err, TaskError::NotFound(id));
        assert!(broadcaster.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_write_broadcasts_nothing() {
        let (tasks, broadcaster, handler) = fixture();
        let task = open_task("Tune bells", Some("agent-42"));
        tasks.save(&task).await.unwrap();
        tasks.fail_writes(true);

        let result = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: agent("agent-42"),
                task_id: *task.id(),
                status: TaskStatus::InProgress,
            })
            .await;

        assert!(matches!(result, Err(TaskError::Infrastructure(_))));
        assert!(broadcaster.calls().is_empty());
        let stored = tasks.find_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), TaskStatus::Open);
    }

    #[tokio::test]
    async fn status_change_after_reassignment_keeps_new_assignee() {
        let (tasks, broadcaster, handler) = fixture();
        let task = open_task("Tune bells", Some("agent-42"));
        tasks.save(&task).await.unwrap();

        // agent-42 still has the task on screen while the Overseer hands it on
        let fanout = Arc::new(RealtimeFanout::new(
            Arc::new(InMemoryNotificationRepository::new()),
            Arc::new(RecordingBroadcaster::new()),
        ));
        UpdateTaskHandler::new(tasks.clone(), fanout)
            .handle(UpdateTaskCommand {
                actor: overseer(),
                task_id: *task.id(),
                patch: TaskPatch {
                    assignee: Some(Some(UserId::new("agent-7").unwrap())),
                    ..TaskPatch::default()
                },
            })
            .await
            .unwrap();

        let err = handler
            .handle(UpdateMyTaskStatusCommand {
                actor: agent("agent-42"),
                task_id: *task.id(),
                status: TaskStatus::InProgress,
            })
            .await
            .unwrap_err();

        assert_eq!(err, TaskError::Forbidden);
        assert!(broadcaster.calls().is_empty());
        let stored = tasks.find_by_id(task.id()).await.unwrap().unwrap();
        assert_eq!(stored.assignee().map(UserId::as_str), Some("agent-7"));
        assert_eq!(stored.status(), TaskStatus::Open);
    }
}
