//! Test doubles shared by the handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{TaskId, UserId};
use crate::domain::notification::Notification;
use crate::ports::{BroadcastError, Broadcaster, DeliveryReport, TaskChange};

/// One recorded call on the broadcaster.
#[derive(Debug, Clone, PartialEq)]
pub enum Broadcast {
    Task { task_id: TaskId, deleted: bool },
    Notification(Notification),
    Chat(ChatMessage),
    Typing { from: UserId, to: UserId },
}

/// Broadcaster that records every call, optionally failing each one.
#[derive(Default)]
pub struct RecordingBroadcaster {
    calls: Mutex<Vec<Broadcast>>,
    fail: bool,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<Broadcast> {
        self.calls.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Broadcast::Notification(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Broadcast) -> Result<DeliveryReport, BroadcastError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(BroadcastError::Serialization("simulated failure".to_string()));
        }
        Ok(DeliveryReport {
            emissions: 1,
            delivered: 1,
            dropped: 0,
        })
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn broadcast_task_changed(
        &self,
        task_id: TaskId,
        change: TaskChange,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.record(Broadcast::Task {
            task_id,
            deleted: matches!(change, TaskChange::Deleted { .. }),
        })
    }

    async fn broadcast_notification_created(
        &self,
        notification: &Notification,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.record(Broadcast::Notification(notification.clone()))
    }

    async fn broadcast_chat_message(
        &self,
        message: &ChatMessage,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.record(Broadcast::Chat(message.clone()))
    }

    async fn relay_typing(
        &self,
        from: &UserId,
        to: &UserId,
    ) -> Result<DeliveryReport, BroadcastError> {
        self.record(Broadcast::Typing {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

pub fn overseer() -> crate::domain::foundation::AuthenticatedUser {
    crate::domain::foundation::AuthenticatedUser::new(
        UserId::new("santa").unwrap(),
        crate::domain::foundation::Role::Overseer,
    )
}

pub fn agent(id: &str) -> crate::domain::foundation::AuthenticatedUser {
    crate::domain::foundation::AuthenticatedUser::new(
        UserId::new(id).unwrap(),
        crate::domain::foundation::Role::FieldAgent,
    )
}

/// An open task created by the Overseer.
pub fn open_task(title: &str, assignee: Option<&str>) -> crate::domain::task::Task {
    crate::domain::task::Task::new(
        TaskId::new(),
        title.to_string(),
        None,
        crate::domain::task::TaskPriority::Medium,
        None,
        assignee.map(|a| UserId::new(a).unwrap()),
        UserId::new("santa").unwrap(),
    )
    .unwrap()
}
