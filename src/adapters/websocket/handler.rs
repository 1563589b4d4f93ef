//! WebSocket upgrade handler for realtime connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Verify the `token` query parameter (refuse with 401 before upgrading)
//! 2. Upgrade to WebSocket
//! 3. Join identity room, plus the privileged room for the Overseer
//! 4. Pump the session outbox to the socket and client frames to handlers
//! 5. Leave every room on disconnect

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::AuthRejection;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::SessionValidator;

use super::{
    messages::{
        ClientMessage, ConnectedMessage, ControlMessage, ErrorMessage, PongMessage,
        ServerMessage, UnsupportedMessage,
    },
    relay::TypingRelay,
    rooms::{ClientId, RoomRegistry, SessionRegistration},
};

/// Default interval between protocol-level pings.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(25);

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Live sessions and their rooms.
    pub registry: Arc<RoomRegistry>,
    /// Verifies the connection-time credential.
    pub validator: Arc<dyn SessionValidator>,
    /// Forwards typing pulses.
    pub relay: TypingRelay,
    /// Interval between protocol-level pings.
    pub heartbeat_interval: Duration,
}

impl WebSocketState {
    /// Create a new WebSocket state.
    pub fn new(
        registry: Arc<RoomRegistry>,
        validator: Arc<dyn SessionValidator>,
        relay: TypingRelay,
    ) -> Self {
        Self {
            registry,
            validator,
            relay,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }
}

/// Connection-time auth data.
#[derive(Debug, Deserialize)]
pub struct WsAuthQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws?token=<jwt>`
///
/// The credential is verified before the upgrade. A refused connection
/// never touches the room registry.
pub async fn ws_handler(
    State(state): State<WebSocketState>,
    Query(query): Query<WsAuthQuery>,
    ws: Option<WebSocketUpgrade>,
) -> Response {
    let token = query.token.unwrap_or_default();
    let user = match state.validator.validate(token.trim()).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(error = %e, "Refusing realtime connection");
            return AuthRejection::from(e).into_response();
        }
    };

    let Some(ws) = ws else {
        return (
            StatusCode::UPGRADE_REQUIRED,
            Json(ErrorResponse::new(
                "UPGRADE_REQUIRED",
                "Expected a WebSocket upgrade request",
            )),
        )
            .into_response();
    };

    ws.on_upgrade(move |socket| handle_socket(socket, user, state))
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection.
async fn handle_socket(socket: WebSocket, user: AuthenticatedUser, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let SessionRegistration {
        client_id,
        rooms,
        receiver: mut outbox,
    } = state.registry.join(&user).await;

    tracing::info!(
        client_id = %client_id,
        user_id = %user.id,
        role = %user.role,
        "Realtime session opened"
    );

    let connected = ServerMessage::from(ControlMessage::Connected(ConnectedMessage {
        client_id: client_id.to_string(),
        user_id: user.id.to_string(),
        role: user.role,
        rooms,
    }));

    if let Err(e) = send_message(&mut sender, &connected).await {
        tracing::debug!(client_id = %client_id, "Failed to send connected message: {}", e);
        state.registry.leave(&client_id).await;
        return;
    }

    // Outbox → socket, with periodic protocol pings.
    let mut send_task = {
        let client_id = client_id.clone();
        let heartbeat = state.heartbeat_interval.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(heartbeat);
            ticker.tick().await;
            loop {
                tokio::select! {
                    frame = outbox.recv() => {
                        let Some(frame) = frame else { break };
                        if let Err(e) = sender.send(Message::Text(frame.to_string())).await {
                            tracing::debug!(client_id = %client_id, "Send error, closing connection: {}", e);
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if sender.send(Message::Ping(Vec::new())).await.is_err() {
                            break;
                        }
                    }
                }
            }
        })
    };

    // Socket → frame handlers.
    let mut recv_task = {
        let registry = state.registry.clone();
        let relay = state.relay.clone();
        let client_id = client_id.clone();
        let user = user.clone();
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        handle_client_text(&text, &user, &client_id, &registry, &relay).await;
                    }
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(client_id = %client_id, "Received unsupported binary message");
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // Handled by axum
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(client_id = %client_id, "Client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(client_id = %client_id, "Receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.registry.leave(&client_id).await;
    tracing::info!(client_id = %client_id, user_id = %user.id, "Realtime session closed");
}

/// Dispatch one client text frame.
///
/// Unknown events are ignored. Frames that are not JSON get an `error` reply.
pub(crate) async fn handle_client_text(
    text: &str,
    user: &AuthenticatedUser,
    client_id: &ClientId,
    registry: &RoomRegistry,
    relay: &TypingRelay,
) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) if e.is_data() => {
            tracing::debug!(client_id = %client_id, "Ignoring unknown client event: {}", e);
            return;
        }
        Err(e) => {
            reply(
                registry,
                client_id,
                ControlMessage::Error(ErrorMessage {
                    code: "INVALID_FRAME".to_string(),
                    message: e.to_string(),
                }),
            )
            .await;
            return;
        }
    };

    match message {
        ClientMessage::Typing(request) => {
            relay.relay(user, request).await;
        }
        ClientMessage::Ping => {
            reply(registry, client_id, ControlMessage::Pong(PongMessage::now())).await;
        }
        ClientMessage::ChatSend(_) => {
            reply(
                registry,
                client_id,
                ControlMessage::ChatUnsupported(UnsupportedMessage::chat_send()),
            )
            .await;
        }
    }
}

async fn reply(registry: &RoomRegistry, client_id: &ClientId, message: ControlMessage) {
    let frame = match ServerMessage::from(message).to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            tracing::error!(client_id = %client_id, "Failed to encode reply: {}", e);
            return;
        }
    };
    if let Err(e) = registry.send_to_client(client_id, frame).await {
        tracing::debug!(client_id = %client_id, error = %e, "Reply not delivered");
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let frame = msg.to_frame().map_err(axum::Error::new)?;
    sender.send(Message::Text(frame.to_string())).await
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router(state: WebSocketState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::memory::InMemoryTaskRepository;
    use crate::adapters::websocket::messages::Frame;
    use crate::adapters::websocket::RoomBroadcaster;
    use crate::domain::foundation::{Role, UserId};
    use serde_json::Value;

    struct Fixture {
        registry: Arc<RoomRegistry>,
        relay: TypingRelay,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(RoomRegistry::with_default_capacity());
        let broadcaster = Arc::new(RoomBroadcaster::new(
            registry.clone(),
            Arc::new(InMemoryTaskRepository::new()),
        ));
        Fixture {
            registry,
            relay: TypingRelay::new(broadcaster),
        }
    }

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(id).unwrap(), role)
    }

    fn next_json(rx: &mut tokio::sync::mpsc::Receiver<Frame>) -> Value {
        serde_json::from_str(&rx.try_recv().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn ping_is_answered_to_sender_only() {
        let f = fixture();
        let agent = user("agent-42", Role::FieldAgent);
        let mut me = f.registry.join(&agent).await;
        let mut other_tab = f.registry.join(&agent).await;

        handle_client_text(r#"{"event":"ping"}"#, &agent, &me.client_id, &f.registry, &f.relay)
            .await;

        let pong = next_json(&mut me.receiver);
        assert_eq!(pong["event"], "pong");
        assert!(pong["data"]["timestamp"].is_string());
        assert!(other_tab.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn chat_send_is_refused_with_rest_hint() {
        let f = fixture();
        let agent = user("agent-42", Role::FieldAgent);
        let mut me = f.registry.join(&agent).await;
        let mut santa = f.registry.join(&user("santa", Role::Overseer)).await;

        handle_client_text(
            r#"{"event":"chat:send","data":{"toUserId":"santa","message":"hi"}}"#,
            &agent,
            &me.client_id,
            &f.registry,
            &f.relay,
        )
        .await;

        let reply = next_json(&mut me.receiver);
        assert_eq!(reply["event"], "chat:unsupported");
        assert_eq!(reply["data"]["message"], "Use REST /api/chat/dm/:userId");
        assert!(santa.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn typing_uses_session_identity_not_payload() {
        let f = fixture();
        let agent = user("agent-42", Role::FieldAgent);
        let me = f.registry.join(&agent).await;
        let mut santa = f.registry.join(&user("santa", Role::Overseer)).await;

        handle_client_text(
            r#"{"event":"chat:typing","data":{"toUserId":"santa","fromUserId":"forged"}}"#,
            &agent,
            &me.client_id,
            &f.registry,
            &f.relay,
        )
        .await;

        let pulse = next_json(&mut santa.receiver);
        assert_eq!(pulse["event"], "chat:typing");
        assert_eq!(pulse["data"]["fromUserId"], "agent-42");
    }

    #[tokio::test]
    async fn malformed_json_gets_error_reply() {
        let f = fixture();
        let agent = user("agent-42", Role::FieldAgent);
        let mut me = f.registry.join(&agent).await;

        handle_client_text("{not json", &agent, &me.client_id, &f.registry, &f.relay).await;

        let reply = next_json(&mut me.receiver);
        assert_eq!(reply["event"], "error");
        assert_eq!(reply["data"]["code"], "INVALID_FRAME");
    }

    #[tokio::test]
    async fn unknown_event_is_ignored() {
        let f = fixture();
        let agent = user("agent-42", Role::FieldAgent);
        let mut me = f.registry.join(&agent).await;

        handle_client_text(
            r#"{"event":"task:update","data":{}}"#,
            &agent,
            &me.client_id,
            &f.registry,
            &f.relay,
        )
        .await;

        assert!(me.receiver.try_recv().is_err());
    }

    #[test]
    fn websocket_state_shares_registry() {
        let f = fixture();
        let state = WebSocketState::new(
            f.registry.clone(),
            Arc::new(MockSessionValidator::new()),
            f.relay.clone(),
        )
        .with_heartbeat_interval(Duration::from_secs(5));

        assert!(Arc::ptr_eq(&state.registry, &f.registry));
        assert_eq!(state.heartbeat_interval, Duration::from_secs(5));
    }
}
