//! Notification domain module.
//!
//! Notifications are derived by the task command handlers and pushed as
//! `notification:new` to the target's identity room, with the Overseer
//! always copied.

mod errors;
mod notification;

pub use errors::NotificationError;
pub use notification::{Notification, NotificationDraft, NotificationType};
