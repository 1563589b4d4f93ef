//! Room registry for identity- and role-scoped message routing.
//!
//! # Architecture
//!
//! ```text
//! Room: user:santa     Room: user:agent-42     Room: overseer
//! ├── client-a         ├── client-c            ├── client-a
//! └── client-b         └── client-d            └── client-b
//! ```
//!
//! Every session joins its identity room; Overseer sessions also join the
//! privileged room. A broadcast to `user:agent-42` reaches clients c and d.
//!
//! Rooms and the client index sit behind one lock, so a join or leave is
//! atomic with respect to a broadcast taking its member snapshot.

use std::collections::{HashMap, HashSet};

use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::domain::foundation::{AuthenticatedUser, Role, UserId};
use crate::domain::realtime::RoomKey;

use super::messages::Frame;

/// Default capacity of each session's outbound queue.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 128;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a frame did not reach a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryFailure {
    /// The session's outbox is full (slow consumer).
    #[error("session outbox full")]
    Full,
    /// The session's writer has gone away.
    #[error("session closed")]
    Closed,
    /// No such client is registered.
    #[error("client not connected")]
    NotConnected,
}

/// Sending side of a registered session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    client_id: ClientId,
    user_id: UserId,
    outbox: mpsc::Sender<Frame>,
}

impl SessionHandle {
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Enqueue without waiting. A slow session loses the frame rather than
    /// stalling the broadcast.
    pub fn try_deliver(&self, frame: Frame) -> Result<(), DeliveryFailure> {
        self.outbox.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DeliveryFailure::Full,
            mpsc::error::TrySendError::Closed(_) => DeliveryFailure::Closed,
        })
    }
}

/// What a newly joined session gets back.
#[derive(Debug)]
pub struct SessionRegistration {
    pub client_id: ClientId,
    pub rooms: Vec<RoomKey>,
    /// Frames routed to this session, to be written to its socket.
    pub receiver: mpsc::Receiver<Frame>,
}

struct ClientEntry {
    handle: SessionHandle,
    role: Role,
    rooms: Vec<RoomKey>,
}

#[derive(Default)]
struct RegistryState {
    rooms: HashMap<RoomKey, HashSet<ClientId>>,
    clients: HashMap<ClientId, ClientEntry>,
}

/// Manages live sessions and the rooms they occupy.
///
/// Provides:
/// - Join on verified connect, leave on disconnect
/// - Snapshot of a room's members for broadcasting
/// - Automatic cleanup of empty rooms
pub struct RoomRegistry {
    state: RwLock<RegistryState>,
    outbox_capacity: usize,
}

impl RoomRegistry {
    /// Create a registry whose sessions buffer up to `outbox_capacity` frames.
    pub fn new(outbox_capacity: usize) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            outbox_capacity: outbox_capacity.max(1),
        }
    }

    /// Create with default capacity (128 frames).
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_OUTBOX_CAPACITY)
    }

    /// Register a verified session in every room its identity and role imply.
    ///
    /// Infallible: once the credential is verified, joining cannot fail.
    pub async fn join(&self, user: &AuthenticatedUser) -> SessionRegistration {
        let client_id = ClientId::new();
        let rooms = RoomKey::memberships(&user.id, user.role);
        let (tx, rx) = mpsc::channel(self.outbox_capacity);

        let mut state = self.state.write().await;
        for room in &rooms {
            state
                .rooms
                .entry(room.clone())
                .or_default()
                .insert(client_id.clone());
        }
        state.clients.insert(
            client_id.clone(),
            ClientEntry {
                handle: SessionHandle {
                    client_id: client_id.clone(),
                    user_id: user.id.clone(),
                    outbox: tx,
                },
                role: user.role,
                rooms: rooms.clone(),
            },
        );
        drop(state);

        tracing::debug!(
            client_id = %client_id,
            user_id = %user.id,
            role = %user.role,
            "Session joined rooms"
        );

        SessionRegistration {
            client_id,
            rooms,
            receiver: rx,
        }
    }

    /// Remove a client from every room it occupies.
    ///
    /// Rooms left empty are dropped. Returns false if the client was unknown.
    pub async fn leave(&self, client_id: &ClientId) -> bool {
        let mut state = self.state.write().await;
        let Some(entry) = state.clients.remove(client_id) else {
            return false;
        };

        for room in &entry.rooms {
            if let Some(members) = state.rooms.get_mut(room) {
                members.remove(client_id);
                if members.is_empty() {
                    state.rooms.remove(room);
                }
            }
        }
        drop(state);

        tracing::debug!(
            client_id = %client_id,
            user_id = %entry.handle.user_id,
            role = %entry.role,
            "Session left rooms"
        );
        true
    }

    /// Snapshot of the sessions currently in `room`.
    ///
    /// The lock is released before the caller delivers, so a slow delivery
    /// never blocks joins or leaves.
    pub async fn members_of(&self, room: &RoomKey) -> Vec<SessionHandle> {
        let state = self.state.read().await;
        state
            .rooms
            .get(room)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| state.clients.get(id))
                    .map(|entry| entry.handle.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Deliver a frame to one session, bypassing rooms.
    pub async fn send_to_client(
        &self,
        client_id: &ClientId,
        frame: Frame,
    ) -> Result<(), DeliveryFailure> {
        let handle = {
            let state = self.state.read().await;
            state
                .clients
                .get(client_id)
                .map(|entry| entry.handle.clone())
        };
        handle
            .ok_or(DeliveryFailure::NotConnected)?
            .try_deliver(frame)
    }

    /// Rooms a client occupies, if it is connected.
    pub async fn rooms_of(&self, client_id: &ClientId) -> Option<Vec<RoomKey>> {
        self.state
            .read()
            .await
            .clients
            .get(client_id)
            .map(|entry| entry.rooms.clone())
    }

    /// Number of sessions in a room (0 if it doesn't exist).
    pub async fn client_count(&self, room: &RoomKey) -> usize {
        self.state
            .read()
            .await
            .rooms
            .get(room)
            .map(HashSet::len)
            .unwrap_or(0)
    }

    /// Number of non-empty rooms.
    pub async fn room_count(&self) -> usize {
        self.state.read().await.rooms.len()
    }

    /// Total count of connected sessions.
    pub async fn total_client_count(&self) -> usize {
        self.state.read().await.clients.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
