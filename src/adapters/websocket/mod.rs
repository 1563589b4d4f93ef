//! WebSocket adapters for realtime fan-out.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              Domain triggers (application handlers)                  │
//! │   commit to store, then call the Broadcaster port                   │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      RoomBroadcaster                                 │
//! │   DomainEvent → [(room, payload)] → encode once → enqueue           │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       RoomRegistry                                   │
//! │   Room: user:santa    Room: user:agent-42    Room: overseer         │
//! │   ├── client-a        └── client-c           └── client-a           │
//! │   └── client-b                               └── client-b           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol types
//! - [`rooms`] - Room registry and per-session outboxes
//! - [`broadcaster`] - `Broadcaster` port implementation
//! - [`relay`] - Typing indicator pass-through
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod broadcaster;
pub mod handler;
pub mod messages;
pub mod relay;
pub mod rooms;

pub use broadcaster::RoomBroadcaster;
pub use handler::{websocket_router, ws_handler, WebSocketState, WsAuthQuery};
pub use messages::{
    ClientMessage, ConnectedMessage, ControlMessage, ErrorMessage, Frame, PongMessage,
    ServerMessage, TypingRequest, UnsupportedMessage,
};
pub use relay::TypingRelay;
pub use rooms::{
    ClientId, DeliveryFailure, RoomRegistry, SessionHandle, SessionRegistration,
    DEFAULT_OUTBOX_CAPACITY,
};
