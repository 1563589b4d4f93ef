//! Room-backed implementation of the `Broadcaster` port.
//!
//! Resolves each domain event to `(room, payload)` emissions through
//! [`DomainEvent::emissions`], encodes each payload once, and enqueues it on
//! every session in the room. Delivery is at-most-once and never waits on a
//! socket.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{TaskId, UserId};
use crate::domain::notification::Notification;
use crate::domain::realtime::{DomainEvent, RoomKey};
use crate::ports::{BroadcastError, Broadcaster, DeliveryReport, TaskChange, TaskRepository};

use super::messages::{Frame, ServerMessage};
use super::rooms::RoomRegistry;

/// Pushes domain events to the sessions in a [`RoomRegistry`].
pub struct RoomBroadcaster {
    registry: Arc<RoomRegistry>,
    tasks: Arc<dyn TaskRepository>,
}

impl RoomBroadcaster {
    pub fn new(registry: Arc<RoomRegistry>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { registry, tasks }
    }

    /// Fan out one event. Emissions are delivered in order before returning.
    pub async fn publish(&self, event: DomainEvent) -> Result<DeliveryReport, BroadcastError> {
        let kind = event.kind();
        let encoded: Vec<(RoomKey, Frame)> = event
            .emissions()
            .into_iter()
            .map(|emission| {
                ServerMessage::from(emission.event)
                    .to_frame()
                    .map(|frame| (emission.room, frame))
                    .map_err(|e| BroadcastError::Serialization(e.to_string()))
            })
            .collect::<Result<_, _>>()?;

        let mut report = DeliveryReport {
            emissions: encoded.len(),
            ..DeliveryReport::default()
        };

        for (room, frame) in encoded {
            for member in self.registry.members_of(&room).await {
                match member.try_deliver(frame.clone()) {
                    Ok(()) => report.delivered += 1,
                    Err(failure) => {
                        report.dropped += 1;
                        tracing::warn!(
                            event = kind,
                            room = %room,
                            client_id = %member.client_id(),
                            user_id = %member.user_id(),
                            error = %failure,
                            "Dropped realtime frame"
                        );
                    }
                }
            }
        }

        tracing::trace!(
            event = kind,
            emissions = report.emissions,
            delivered = report.delivered,
            dropped = report.dropped,
            "Broadcast complete"
        );
        Ok(report)
    }
}

#[async_trait]
impl Broadcaster for RoomBroadcaster {
    async fn broadcast_task_changed(
        &self,
        task_id: TaskId,
        change: TaskChange,
    ) -> Result<DeliveryReport, BroadcastError> {
        let event = match change {
            TaskChange::Upserted => {
                let snapshot = self
                    .tasks
                    .find_by_id(&task_id)
                    .await
                    .map_err(|e| BroadcastError::SnapshotLookup(e.to_string()))?;
                if snapshot.is_none() {
                    tracing::debug!(task_id = %task_id, "Task vanished before broadcast");
                }
                DomainEvent::TaskChanged {
                    task_id,
                    snapshot,
                    deleted: false,
                }
            }
            TaskChange::Deleted { last_snapshot } => DomainEvent::TaskChanged {
                task_id,
                snapshot: Some(last_snapshot),
                deleted: true,
            },
        };
        self.publish(event).await
    }

    async fn broadcast_notification_created(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.publish(DomainEvent::NotificationCreated {
            notification: notification.clone(),
        })
        .await
    }

    async fn broadcast_chat_message(
        &self,
        message: &ChatMessage,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.publish(DomainEvent::ChatMessageSent {
            message: message.clone(),
        })
        .await
    }

    async fn relay_typing(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.publish(DomainEvent::TypingSignal {
            from: from.clone(),
            to: to.clone(),
        })
        .await
    }
}
