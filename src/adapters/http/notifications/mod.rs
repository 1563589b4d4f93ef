//! HTTP adapter for notification endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ListNotificationsParams, MarkReadRequest};
pub use handlers::NotificationHandlers;
pub use routes::notification_routes;
