//! HTTP handlers for notification endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::notification::{
    ListMyNotificationsHandler, ListMyNotificationsQuery, MarkNotificationReadCommand,
    MarkNotificationReadHandler,
};
use crate::domain::foundation::NotificationId;
use crate::domain::notification::NotificationError;

use super::dto::{ListNotificationsParams, MarkReadRequest};

#[derive(Clone)]
pub struct NotificationHandlers {
    list_handler: Arc<ListMyNotificationsHandler>,
    mark_read_handler: Arc<MarkNotificationReadHandler>,
}

impl NotificationHandlers {
    pub fn new(
        list_handler: Arc<ListMyNotificationsHandler>,
        mark_read_handler: Arc<MarkNotificationReadHandler>,
    ) -> Self {
        Self {
            list_handler,
            mark_read_handler,
        }
    }
}

/// GET /api/notifications - The caller's latest notifications
pub async fn list_notifications(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListNotificationsParams>,
) -> Response {
    let query = ListMyNotificationsQuery {
        user_id: user.id,
        limit: params.limit,
    };

    match handlers.list_handler.handle(query).await {
        Ok(notifications) => (StatusCode::OK, Json(notifications)).into_response(),
        Err(e) => handle_notification_error(e),
    }
}

/// PATCH /api/notifications/:notification_id/read - Stamp `readAt`
pub async fn mark_notification_read(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(notification_id): Path<String>,
    body: Option<Json<MarkReadRequest>>,
) -> Response {
    let Ok(notification_id) = notification_id.parse::<NotificationId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid notification ID")),
        )
            .into_response();
    };
    let Json(req) = body.unwrap_or_default();
    if !req.read {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Notifications cannot be marked unread")),
        )
            .into_response();
    }

    let cmd = MarkNotificationReadCommand {
        user_id: user.id,
        notification_id,
    };

    match handlers.mark_read_handler.handle(cmd).await {
        Ok(notification) => (StatusCode::OK, Json(notification)).into_response(),
        Err(e) => handle_notification_error(e),
    }
}

fn handle_notification_error(error: NotificationError) -> Response {
    match error {
        NotificationError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Notification", &id.to_string())),
        )
            .into_response(),
        NotificationError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Notification request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_notification_error(NotificationError::NotFound(NotificationId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_notification_error(NotificationError::Infrastructure("x".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
