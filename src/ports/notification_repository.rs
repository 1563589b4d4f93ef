//! Notification repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::{Notification, NotificationDraft};

/// Repository port for Notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a draft and return the stored notification.
    async fn create(&self, draft: NotificationDraft) -> Result<Notification, DomainError>;

    /// Find a notification by its ID.
    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError>;

    /// Notifications addressed to `target`, newest first, at most `limit`.
    async fn find_by_target(
        &self,
        target: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, DomainError>;

    /// Replace a stored notification (used to record `readAt`).
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if it doesn't exist
    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Unread notifications across every user.
    async fn count_unread(&self) -> Result<u64, DomainError>;
}
