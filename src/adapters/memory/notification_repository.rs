//! In-memory notification repository.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::ports::NotificationRepository;

/// In-memory storage for notifications, kept in creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `DatabaseError` (for tests).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Everything stored, oldest first.
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("notification store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, draft: NotificationDraft) -> Result<Notification, DomainError> {
        self.check_writable()?;
        let notification = Notification::from_draft(NotificationId::new(), draft);
        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .find(|n| n.id() == id)
            .cloned())
    }

    async fn find_by_target(
        &self,
        target: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, DomainError> {
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .rev()
            .filter(|n| n.is_owned_by(target))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut notifications = self.notifications.write().await;
        match notifications.iter_mut().find(|n| n.id() == notification.id()) {
            Some(stored) => {
                *stored = notification.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id()),
            )),
        }
    }

    async fn count_unread(&self) -> Result<u64, DomainError> {
        let notifications = self.notifications.read().await;
        Ok(notifications.iter().filter(|n| !n.is_read()).count() as u64)
    }
}
