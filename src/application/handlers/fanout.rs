//! Post-commit side effects shared by the mutating handlers.
//!
//! Everything here runs after the write committed. Failures are logged and
//! swallowed; the caller's result reflects the persisted state only.

use std::sync::Arc;

use crate::domain::foundation::TaskId;
use crate::domain::notification::{Notification, NotificationDraft};
use crate::ports::{BroadcastError, Broadcaster, DeliveryReport, NotificationRepository, TaskChange};

/// Persists derived notifications and pushes the resulting events.
pub struct RealtimeFanout {
    notifications: Arc<dyn NotificationRepository>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl RealtimeFanout {
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            notifications,
            broadcaster,
        }
    }

    /// Record `drafts`, push `task:update`, then one `notification:new` per
    /// recorded notification. Returns the notifications that were stored.
    pub async fn after_task_commit(
        &self,
        task_id: TaskId,
        change: TaskChange,
        drafts: Vec<NotificationDraft>,
    ) -> Vec<Notification> {
        let created = self.record(drafts).await;

        log_outcome(
            "task:update",
            self.broadcaster.broadcast_task_changed(task_id, change).await,
        );

        for notification in &created {
            self.announce(notification).await;
        }
        created
    }

    async fn announce(&self, notification: &Notification) {
        log_outcome(
            "notification:new",
            self.broadcaster
                .broadcast_notification_created(notification)
                .await,
        );
    }

    async fn record(&self, drafts: Vec<NotificationDraft>) -> Vec<Notification> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let target = draft.target.clone();
            match self.notifications.create(draft).await {
                Ok(notification) => created.push(notification),
                Err(e) => {
                    tracing::warn!(target_user = %target, error = %e, "Failed to record notification");
                }
            }
        }
        created
    }
}

/// Log a broadcast result. Never propagates.
pub(crate) fn log_outcome(event: &'static str, result: Result<DeliveryReport, BroadcastError>) {
    match result {
        Ok(report) if report.dropped > 0 => tracing::warn!(
            event,
            delivered = report.delivered,
            dropped = report.dropped,
            "Broadcast partially delivered"
        ),
        Ok(report) => tracing::debug!(
            event,
            emissions = report.emissions,
            delivered = report.delivered,
            "Broadcast delivered"
        ),
        Err(e) => tracing::warn!(event, error = %e, "Broadcast failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryNotificationRepository;
    use crate::application::handlers::test_support::{Broadcast, RecordingBroadcaster};
    use crate::domain::foundation::UserId;
    use crate::domain::notification::NotificationType;

    fn draft(target: &str) -> NotificationDraft {
        NotificationDraft::new(
            UserId::new(target).unwrap(),
            NotificationType::Updated,
            "Task updated: x",
            None,
        )
    }

    #[tokio::test]
    async fn task_broadcast_precedes_notification_broadcasts() {
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let fanout = RealtimeFanout::new(
            Arc::new(InMemoryNotificationRepository::new()),
            broadcaster.clone(),
        );
        let task_id = TaskId::new();

        let created = fanout
            .after_task_commit(task_id, TaskChange::Upserted, vec![draft("a"), draft("b")])
            .await;

        assert_eq!(created.len(), 2);
        let calls = broadcaster.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[0], Broadcast::Task { task_id: id, deleted: false } if *id == task_id));
        assert!(matches!(&calls[1], Broadcast::Notification(n) if n.target().as_str() == "a"));
        assert!(matches!(&calls[2], Broadcast::Notification(n) if n.target().as_str() == "b"));
    }

    #[tokio::test]
    async fn notification_store_failure_still_broadcasts_task() {
        let store = InMemoryNotificationRepository::new();
        store.fail_writes(true);
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        let fanout = RealtimeFanout::new(Arc::new(store), broadcaster.clone());

        let created = fanout
            .after_task_commit(TaskId::new(), TaskChange::Upserted, vec![draft("a")])
            .await;

        assert!(created.is_empty());
        assert_eq!(broadcaster.calls().len(), 1);
    }

    #[tokio::test]
    async fn broadcast_failure_is_swallowed() {
        let broadcaster = Arc::new(RecordingBroadcaster::failing());
        let fanout = RealtimeFanout::new(
            Arc::new(InMemoryNotificationRepository::new()),
            broadcaster.clone(),
        );

        let created = fanout
            .after_task_commit(TaskId::new(), TaskChange::Upserted, vec![draft("a")])
            .await;

        assert_eq!(created.len(), 1);
        assert_eq!(broadcaster.calls().len(), 2);
    }
}
