//! MarkNotificationReadHandler - owner stamps `readAt`.

use std::sync::Arc;

use crate::domain::foundation::{NotificationId, Timestamp, UserId};
use crate::domain::notification::{Notification, NotificationError};
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
    pub user_id: UserId,
    pub notification_id: NotificationId,
}

pub struct MarkNotificationReadHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Someone else's notification is reported as not found.
    pub async fn handle(
        &self,
        cmd: MarkNotificationReadCommand,
    ) -> Result<Notification, NotificationError> {
        let mut notification = self
            .notifications
            .find_by_id(&cmd.notification_id)
            .await?
            .filter(|n| n.is_owned_by(&cmd.user_id))
            .ok_or(NotificationError::NotFound(cmd.notification_id))?;

        notification.mark_read(Timestamp::now());
        self.notifications.update(&notification).await?;
        Ok(notification)
    }
}
