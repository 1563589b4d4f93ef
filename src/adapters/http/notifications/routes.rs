//! HTTP routes for notification endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{list_notifications, mark_notification_read, NotificationHandlers};

/// Creates the notification router. Mounted under `/api/notifications`.
pub fn notification_routes(handlers: NotificationHandlers) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:notification_id/read", patch(mark_notification_read))
        .with_state(handlers)
}
