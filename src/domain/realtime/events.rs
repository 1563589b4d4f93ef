//! Domain events and their server-to-client wire shapes.
//!
//! [`DomainEvent::emissions`] is the whole routing table: it decides which
//! rooms see which payload. Adapters only resolve rooms to live sessions.

use serde::{Deserialize, Serialize};

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{TaskId, UserId};
use crate::domain::notification::Notification;
use crate::domain::task::Task;

use super::RoomKey;

/// A state change that warrants a realtime push.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// A task was created, updated or deleted.
    ///
    /// `snapshot` is the post-mutation task, or the last known one when
    /// `deleted` is set. It is `None` when the task could not be read back.
    TaskChanged {
        task_id: TaskId,
        snapshot: Option<Task>,
        deleted: bool,
    },
    /// A notification was persisted for its target identity.
    NotificationCreated { notification: Notification },
    /// A direct message was persisted.
    ChatMessageSent { message: ChatMessage },
    /// Ephemeral "is typing" pulse. Never persisted.
    TypingSignal { from: UserId, to: UserId },
}

/// One payload addressed to one room.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub room: RoomKey,
    pub event: RealtimeEvent,
}

impl Emission {
    fn new(room: RoomKey, event: RealtimeEvent) -> Self {
        Self { room, event }
    }
}

impl DomainEvent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainEvent::TaskChanged { .. } => "task_changed",
            DomainEvent::NotificationCreated { .. } => "notification_created",
            DomainEvent::ChatMessageSent { .. } => "chat_message_sent",
            DomainEvent::TypingSignal { .. } => "typing_signal",
        }
    }

    /// Resolve the target rooms and payloads, in emission order.
    ///
    /// The privileged room may receive a payload that an identity room of the
    /// same user also receives. Consumers replace by id, so duplicates are
    /// harmless and are not filtered here.
    pub fn emissions(&self) -> Vec<Emission> {
        match self {
            DomainEvent::TaskChanged {
                task_id,
                snapshot,
                deleted,
            } => {
                let task = if *deleted {
                    Some(TaskSnapshot::Removed { id: *task_id })
                } else {
                    snapshot.clone().map(|task| TaskSnapshot::Current(Box::new(task)))
                };
                let event = RealtimeEvent::TaskUpdate(TaskUpdate {
                    task,
                    deleted: *deleted,
                });

                let mut out = vec![Emission::new(RoomKey::Privileged, event.clone())];
                if let Some(assignee) = snapshot.as_ref().and_then(Task::assignee) {
                    out.push(Emission::new(RoomKey::identity(assignee), event));
                }
                out
            }
            DomainEvent::NotificationCreated { notification } => {
                let event = RealtimeEvent::NotificationNew(NotificationNew {
                    notification: notification.clone(),
                });
                vec![
                    Emission::new(RoomKey::identity(notification.target()), event.clone()),
                    Emission::new(RoomKey::Privileged, event),
                ]
            }
            DomainEvent::ChatMessageSent { message } => vec![
                Emission::new(
                    RoomKey::identity(message.to()),
                    RealtimeEvent::ChatMessage(ChatDelivery {
                        message: message.clone(),
                        is_self: false,
                    }),
                ),
                Emission::new(
                    RoomKey::identity(message.from()),
                    RealtimeEvent::ChatMessage(ChatDelivery {
                        message: message.clone(),
                        is_self: true,
                    }),
                ),
            ],
            DomainEvent::TypingSignal { from, to } => vec![Emission::new(
                RoomKey::identity(to),
                RealtimeEvent::Typing(TypingPulse {
                    from_user_id: from.clone(),
                }),
            )],
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire payloads
// ════════════════════════════════════════════════════════════════════════════════

/// Server-to-client realtime event, framed as `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum RealtimeEvent {
    #[serde(rename = "task:update")]
    TaskUpdate(TaskUpdate),
    #[serde(rename = "notification:new")]
    NotificationNew(NotificationNew),
    #[serde(rename = "chat:msg")]
    ChatMessage(ChatDelivery),
    #[serde(rename = "chat:typing")]
    Typing(TypingPulse),
}

impl RealtimeEvent {
    /// Event name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            RealtimeEvent::TaskUpdate(_) => "task:update",
            RealtimeEvent::NotificationNew(_) => "notification:new",
            RealtimeEvent::ChatMessage(_) => "chat:msg",
            RealtimeEvent::Typing(_) => "chat:typing",
        }
    }
}

/// `task:update` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdate {
    pub task: Option<TaskSnapshot>,
    pub deleted: bool,
}

/// Task body carried by `task:update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskSnapshot {
    Current(Box<Task>),
    /// Only the id survives a deletion.
    Removed {
        #[serde(rename = "_id")]
        id: TaskId,
    },
}

/// `notification:new` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationNew {
    pub notification: Notification,
}

/// `chat:msg` payload: the stored message plus the sender-echo marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatDelivery {
    #[serde(flatten)]
    pub message: ChatMessage,
    #[serde(rename = "self")]
    pub is_self: bool,
}

/// `chat:typing` payload sent to the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingPulse {
    #[serde(rename = "fromUserId")]
    pub from_user_id: UserId,
}
