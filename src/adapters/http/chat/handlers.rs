//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::chat::{
    GetOverseerHandler, ListConversationHandler, ListConversationQuery, SendMessageCommand,
    SendMessageHandler,
};
use crate::domain::chat::ChatError;
use crate::domain::foundation::UserId;

use super::dto::{OverseerResponse, SendMessageRequest};

#[derive(Clone)]
pub struct ChatHandlers {
    send_handler: Arc<SendMessageHandler>,
    conversation_handler: Arc<ListConversationHandler>,
    overseer_handler: Arc<GetOverseerHandler>,
}

impl ChatHandlers {
    pub fn new(
        send_handler: Arc<SendMessageHandler>,
        conversation_handler: Arc<ListConversationHandler>,
        overseer_handler: Arc<GetOverseerHandler>,
    ) -> Self {
        Self {
            send_handler,
            conversation_handler,
            overseer_handler,
        }
    }
}

/// GET /api/chat/overseer - Who to message for coordination
pub async fn get_overseer(
    State(handlers): State<ChatHandlers>,
    RequireAuth(_user): RequireAuth,
) -> Response {
    match handlers.overseer_handler.handle().await {
        Ok(overseer) => (StatusCode::OK, Json(OverseerResponse::from(overseer))).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/chat/dm/:user_id - Conversation with a peer, oldest first
pub async fn list_conversation(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(peer): Path<String>,
) -> Response {
    let peer = match parse_peer(&peer) {
        Ok(peer) => peer,
        Err(response) => return response,
    };

    match handlers
        .conversation_handler
        .handle(ListConversationQuery { me: user.id, peer })
        .await
    {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// POST /api/chat/dm/:user_id - Send a direct message
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    RequireAuth(user): RequireAuth,
    Path(peer): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let to = match parse_peer(&peer) {
        Ok(peer) => peer,
        Err(response) => return response,
    };

    let cmd = SendMessageCommand {
        from: user.id,
        to,
        message: req.message,
    };

    match handlers.send_handler.handle(cmd).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(e) => handle_chat_error(e),
    }
}

fn parse_peer(raw: &str) -> Result<UserId, Response> {
    UserId::new(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid userId")),
        )
            .into_response()
    })
}

fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::UserNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("User", id.as_str())),
        )
            .into_response(),
        ChatError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(&field, message)),
        )
            .into_response(),
        ChatError::OverseerMissing => {
            tracing::error!("No Overseer account registered");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Overseer not found")),
            )
                .into_response()
        }
        ChatError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Chat request failed");
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
    fn user_not_found_maps_to_404() {
        let response = handle_chat_error(ChatError::UserNotFound(UserId::new("x").unwrap()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = handle_chat_error(ChatError::ValidationFailed {
            field: "message".to_string(),
            message: "Field 'message' cannot be empty".to_string(),
        });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_overseer_maps_to_500() {
        let response = handle_chat_error(ChatError::OverseerMissing);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn malformed_peer_is_400() {
        assert_eq!(
            parse_peer("").unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
