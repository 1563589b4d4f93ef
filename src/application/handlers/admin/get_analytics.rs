//! GetAnalyticsHandler - dashboard figures for the Overseer.

use std::sync::Arc;

use crate::domain::admin::{AdminError, AnalyticsReport};
use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::ports::{NotificationRepository, TaskRepository, UserDirectory};

#[derive(Debug, Clone)]
pub struct GetAnalyticsQuery {
    pub actor: AuthenticatedUser,
}

pub struct GetAnalyticsHandler {
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationRepository>,
}

impl GetAnalyticsHandler {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserDirectory>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            tasks,
            users,
            notifications,
        }
    }

    pub async fn handle(&self, query: GetAnalyticsQuery) -> Result<AnalyticsReport, AdminError> {
        query.actor.require_role(Role::Overseer)?;

        let tasks = self.tasks.list_all().await?;
        let agents = self.users.list_by_role(Role::FieldAgent).await?;
        let unread = self.notifications.count_unread().await?;

        Ok(AnalyticsReport::compile(&tasks, &agents, unread))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryNotificationRepository, InMemoryTaskRepository, InMemoryUserDirectory,
    };
    use crate::application::handlers::test_support::{agent, open_task, overseer};
    use crate::domain::foundation::UserId;
    use crate::domain::notification::{NotificationDraft, NotificationType};
    use crate::domain::task::TaskStatus;
    use crate::domain::user::UserSummary;

    struct Fixture {
        tasks: Arc<InMemoryTaskRepository>,
        notifications: Arc<InMemoryNotificationRepository>,
        handler: GetAnalyticsHandler,
    }

    fn fixture() -> Fixture {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let notifications = Arc::new(InMemoryNotificationRepository::new());
        let users = Arc::new(InMemoryUserDirectory::with_users([
            UserSummary::new(UserId::new("santa").unwrap(), "santa", Role::Overseer),
            UserSummary::new(UserId::new("elf01").unwrap(), "elf01", Role::FieldAgent),
            UserSummary::new(UserId::new("elf02").unwrap(), "elf02", Role::FieldAgent),
        ]));
        let handler = GetAnalyticsHandler::new(tasks.clone(), users, notifications.clone());
        Fixture {
            tasks,
            notifications,
            handler,
        }
    }

    #[tokio::test]
    async fn report_reflects_stored_state() {
        let f = fixture();
        f.tasks.save(&open_task("sleigh", Some("elf02"))).await.unwrap();
        f.tasks.save(&open_task("reindeer", Some("elf02"))).await.unwrap();
        f.tasks.save(&open_task("cocoa", None)).await.unwrap();
        let done = open_task("list", Some("elf01"));
        f.tasks.save(&done).await.unwrap();
        f.tasks
            .set_status(done.id(), &UserId::new("elf01").unwrap(), TaskStatus::Completed)
            .await
            .unwrap();
        f.notifications
            .create(NotificationDraft::new(
                UserId::new("elf02").unwrap(),
                NotificationType::Assigned,
                "New task assigned: sleigh",
                None,
            ))
            .await
            .unwrap();

        let report = f
            .handler
            .handle(GetAnalyticsQuery { actor: overseer() })
            .await
            .unwrap();

        assert_eq!(report.tasks.total, 4);
        assert_eq!(report.tasks.open, 3);
        assert_eq!(report.tasks.completed, 1);
        let rows: Vec<_> = report
            .agents
            .iter()
            .map(|w| (w.user_id.as_str(), w.open_count))
            .collect();
        assert_eq!(rows, vec![("elf02", 2), ("elf01", 0)]);
        assert_eq!(report.unread_notifications, 1);
    }

    #[tokio::test]
    async fn field_agent_is_forbidden() {
        let err = fixture()
            .handler
            .handle(GetAnalyticsQuery {
                actor: agent("elf01"),
            })
            .await
            .unwrap_err();
        assert_eq!(err, AdminError::Forbidden);
    }
}
