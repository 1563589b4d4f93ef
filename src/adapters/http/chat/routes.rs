//! HTTP routes for chat endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_overseer, list_conversation, send_message, ChatHandlers};

/// Creates the chat router. Mounted under `/api/chat`.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/overseer", get(get_overseer))
        .route("/dm/:user_id", get(list_conversation).post(send_message))
        .with_state(handlers)
}
