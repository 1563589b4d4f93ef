//! CreateTaskHandler - Overseer creates a task, optionally pre-assigned.

use std::sync::Arc;

use crate::application::handlers::fanout::RealtimeFanout;
use crate::domain::foundation::{AuthenticatedUser, Role, TaskId, Timestamp, UserId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::task::{Task, TaskError, TaskPriority};
use crate::ports::{TaskChange, TaskRepository};

/// Command to create a task.
#[derive(Debug, Clone)]
pub struct CreateTaskCommand {
    pub actor: AuthenticatedUser,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_at: Option<Timestamp>,
    pub assignee: Option<UserId>,
}

/// Result of successful task creation.
#[derive(Debug, Clone)]
pub struct CreateTaskResult {
    pub task: Task,
    pub notifications: Vec<Notification>,
}

/// Handler for creating tasks.
pub struct CreateTaskHandler {
    tasks: Arc<dyn TaskRepository>,
    fanout: Arc<RealtimeFanout>,
}

impl CreateTaskHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>, fanout: Arc<RealtimeFanout>) -> Self {
        Self { tasks, fanout }
    }

    pub async fn handle(&self, cmd: CreateTaskCommand) -> Result<CreateTaskResult, TaskError> {
        // 1. Validate
        cmd.actor.require_role(Role::Overseer)?;
        let task = Task::new(
            TaskId::new(),
            cmd.title,
            cmd.description,
            cmd.priority.unwrap_or_default(),
            cmd.due_at,
            cmd.assignee,
            cmd.actor.id.clone(),
        )?;

        // 2. Persist
        self.tasks.save(&task).await?;

        // 3-5. Derive notifications and broadcast
        let drafts: Vec<NotificationDraft> = task
            .assignee()
            .map(|assignee| NotificationDraft::assigned_on_create(assignee.clone(), &task))
            .into_iter()
            .collect();
        let notifications = self
            .fanout
            .after_task_commit(*task.id(), TaskChange::Upserted, drafts)
            .await;

        tracing::info!(task_id = %task.id(), assignee = ?task.assignee().map(|a| a.as_str()), "Task created");
        Ok(CreateTaskResult {
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
        agent, overseer, Broadcast, RecordingBroadcaster,
    };
    use crate::domain::notification::NotificationType;
    use crate::domain::task::TaskStatus;

    struct Fixture {
        tasks: Arc<InMemoryTaskRepository>,
        broadcaster: Arc<RecordingBroadcaster>,
        handler: CreateTaskHandler,
    }

    fn fixture() -> Fixture {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let fanout = Arc::new(RealtimeFanout::new(
            Arc::new(InMemoryNotificationRepository::new()),
            broadcaster.clone(),
        ));
        Fixture {
            handler: CreateTaskHandler::new(tasks.clone(), fanout),
            tasks,
            broadcaster,
        }
    }

    fn command(assignee: Option<&str>) -> CreateTaskCommand {
        CreateTaskCommand {
            actor: overseer(),
            title: "Wrap presents".to_string(),
            description: None,
            priority: None,
            due_at: None,
            assignee: assignee.map(|a| UserId::new(a).unwrap()),
        }
    }

    #[tokio::test]
    async fn creates_open_medium_task() {
        let f = fixture();
        let result = f.handler.handle(command(None)).await.unwrap();

        assert_eq!(result.task.status(), TaskStatus::Open);
        assert_eq!(result.task.priority(), TaskPriority::Medium);
        assert_eq!(f.tasks.len().await, 1);
        assert!(result.notifications.is_empty());
        assert_eq!(
            f.broadcaster.calls(),
            vec![Broadcast::Task {
                task_id: *result.task.id(),
                deleted: false
            }]
        );
    }

    #[tokio::test]
    async fn assignee_gets_assigned_notification() {
        let f = fixture();
        let result = f.handler.handle(command(Some("agent-42"))).await.unwrap();

        assert_eq!(result.notifications.len(), 1);
        let n = &result.notifications[0];
        assert_eq!(n.kind(), NotificationType::Assigned);
        assert_eq!(n.target().as_str(), "agent-42");
        assert_eq!(n.message(), "New task assigned: Wrap presents");
        assert_eq!(f.broadcaster.notifications(), result.notifications);
    }

    #[tokio::test]
    async fn field_agent_cannot_create() {
        let f = fixture();
        let mut cmd = command(None);
        cmd.actor = agent("agent-42");

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, TaskError::Forbidden);
        assert!(f.broadcaster.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_title_never_persists_or_broadcasts() {
        let f = fixture();
        let mut cmd = command(Some("agent-42"));
        cmd.title = "   ".to_string();

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(matches!(err, TaskError::ValidationFailed { ref field, .. } if field == "title"));
        assert!(f.tasks.is_empty().await);
        assert!(f.broadcaster.calls().is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_skips_broadcast() {
        let f = fixture();
        f.tasks.fail_writes(true);

        let err = f.handler.handle(command(Some("agent-42"))).await.unwrap_err();
        assert!(matches!(err, TaskError::Infrastructure(_)));
        assert!(f.broadcaster.calls().is_empty());
    }
}
