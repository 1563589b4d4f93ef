//! ListMyNotificationsHandler - the caller's latest notifications.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::notification::{Notification, NotificationError};
use crate::ports::NotificationRepository;

/// Upper bound on notifications returned per request.
pub const MAX_NOTIFICATIONS_PER_PAGE: usize = 50;

#[derive(Debug, Clone)]
pub struct ListMyNotificationsQuery {
    pub user_id: UserId,
    pub limit: Option<usize>,
}

pub struct ListMyNotificationsHandler {
    notifications: Arc<dyn NotificationRepository>,
}

impl ListMyNotificationsHandler {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    /// Newest first.
    pub async fn handle(
        &self,
        query: ListMyNotificationsQuery,
    ) -> Result<Vec<Notification>, NotificationError> {
        let limit = query
            .limit
            .unwrap_or(MAX_NOTIFICATIONS_PER_PAGE)
            .clamp(1, MAX_NOTIFICATIONS_PER_PAGE);
        Ok(self
            .notifications
            .find_by_target(&query.user_id, limit)
            .await?)
    }
}
