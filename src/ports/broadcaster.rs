//! Broadcaster port - realtime fan-out of committed state changes.
//!
//! Domain triggers call this after their write has committed. Every method
//! is best-effort: a returned error describes what could not be delivered
//! and callers log it, never propagate it.

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{TaskId, UserId};
use crate::domain::notification::Notification;
use crate::domain::task::Task;

/// What happened to a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskChange {
    /// Created or updated; the broadcaster reads the current snapshot.
    Upserted,
    /// Deleted; `last_snapshot` is the pre-delete state, used only to route
    /// the tombstone to the former assignee.
    Deleted { last_snapshot: Task },
}

/// Outcome of one broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// `(room, payload)` pairs resolved for the event.
    pub emissions: usize,
    /// Session outboxes that accepted a frame.
    pub delivered: usize,
    /// Session outboxes that were full or closed.
    pub dropped: usize,
}

/// Broadcast failures. None of these ever fail the triggering mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BroadcastError {
    /// Reading the task snapshot failed.
    #[error("Snapshot lookup failed: {0}")]
    SnapshotLookup(String),

    /// A payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for pushing domain events to connected sessions.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// `task:update` to the privileged room and the current assignee's room.
    async fn broadcast_task_changed(
        &self,
        task_id: TaskId,
        change: TaskChange,
    ) -> Result<DeliveryReport, BroadcastError>;

    /// `notification:new` to the target's room and the privileged room.
    async fn broadcast_notification_created(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReport, BroadcastError>;

    /// `chat:msg` to the recipient (`self=false`) and the sender (`self=true`).
    async fn broadcast_chat_message(
        &self,
        message: &ChatMessage,
    ) -> Result<DeliveryReport, BroadcastError>;

    /// `chat:typing` to the recipient's room only.
    async fn relay_typing(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<DeliveryReport, BroadcastError>;
}
