//! WebSocket message types for the realtime channel.
//!
//! Every text frame, in both directions, is `{"event": <name>, "data": <payload>}`.
//! - Server → Client: domain events (`task:update`, `notification:new`,
//!   `chat:msg`, `chat:typing`) plus connection control frames
//! - Client → Server: `chat:typing`, `ping`, and the retired `chat:send`

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp};
use crate::domain::realtime::{RealtimeEvent, RoomKey};

/// Pre-encoded text frame queued on a session outbox.
///
/// Broadcasts encode once per emission and share the frame across members.
pub type Frame = Arc<str>;

// ============================================
// Server → Client Messages
// ============================================

/// Everything the server may write to a socket.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// Room-routed domain event.
    Realtime(RealtimeEvent),
    /// Reply addressed to one session only.
    Control(ControlMessage),
}

impl ServerMessage {
    /// Encode as a text frame.
    pub fn to_frame(&self) -> Result<Frame, serde_json::Error> {
        serde_json::to_string(self).map(Frame::from)
    }
}

impl From<RealtimeEvent> for ServerMessage {
    fn from(event: RealtimeEvent) -> Self {
        ServerMessage::Realtime(event)
    }
}

impl From<ControlMessage> for ServerMessage {
    fn from(message: ControlMessage) -> Self {
        ServerMessage::Control(message)
    }
}

/// Session-scoped frames that never go through a room.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ControlMessage {
    /// Sent once after the session joined its rooms.
    #[serde(rename = "connected")]
    Connected(ConnectedMessage),

    /// Answer to a client `ping`.
    #[serde(rename = "pong")]
    Pong(PongMessage),

    /// Answer to the retired `chat:send`; messages go through REST.
    #[serde(rename = "chat:unsupported")]
    ChatUnsupported(UnsupportedMessage),

    /// A client frame could not be understood.
    #[serde(rename = "error")]
    Error(ErrorMessage),
}

/// Sent when a client successfully connects and joins its rooms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub client_id: String,
    pub user_id: String,
    pub role: Role,
    pub rooms: Vec<RoomKey>,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

impl PongMessage {
    pub fn now() -> Self {
        Self {
            timestamp: Timestamp::now().to_rfc3339(),
        }
    }
}

/// Explains why a client frame was refused.
#[derive(Debug, Clone, Serialize)]
pub struct UnsupportedMessage {
    pub message: String,
}

impl UnsupportedMessage {
    /// Fixed answer to `chat:send`.
    pub fn chat_send() -> Self {
        Self {
            message: "Use REST /api/chat/dm/:userId".to_string(),
        }
    }
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    /// "I am typing to `toUserId`."
    #[serde(rename = "chat:typing")]
    Typing(TypingRequest),

    /// Heartbeat request.
    #[serde(rename = "ping")]
    Ping,

    /// Retired socket send path. The payload is ignored.
    #[serde(rename = "chat:send")]
    ChatSend(serde::de::IgnoredAny),
}

/// Client typing payload. The sender is never read from here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypingRequest {
    #[serde(rename = "toUserId", default)]
    pub to_user_id: String,
}
