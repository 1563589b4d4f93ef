//! Notification command and query handlers.

mod list_my_notifications;
mod mark_notification_read;

pub use list_my_notifications::{
    ListMyNotificationsHandler, ListMyNotificationsQuery, MAX_NOTIFICATIONS_PER_PAGE,
};
pub use mark_notification_read::{MarkNotificationReadCommand, MarkNotificationReadHandler};
