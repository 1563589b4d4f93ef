//! Notification entity and the drafts that create it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NotificationId, TaskId, Timestamp, UserId};
use crate::domain::task::Task;

/// Kind of notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationType {
    #[serde(rename = "TASK_ASSIGNED")]
    Assigned,
    #[serde(rename = "TASK_UPDATED")]
    Updated,
    #[serde(rename = "TASK_STATUS_CHANGED")]
    StatusChanged,
}

impl NotificationType {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Assigned => "TASK_ASSIGNED",
            NotificationType::Updated => "TASK_UPDATED",
            NotificationType::StatusChanged => "TASK_STATUS_CHANGED",
        }
    }

    /// Parses the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TASK_ASSIGNED" => Some(NotificationType::Assigned),
            "TASK_UPDATED" => Some(NotificationType::Updated),
            "TASK_STATUS_CHANGED" => Some(NotificationType::StatusChanged),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted notification addressed to one identity.
///
/// Only the owning identity may mark it read; it is never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    id: NotificationId,
    #[serde(rename = "userId")]
    target: UserId,
    #[serde(rename = "type")]
    kind: NotificationType,
    message: String,
    task_id: Option<TaskId>,
    read_at: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Notification {
    /// Materialize a draft into a fresh unread notification.
    pub fn from_draft(id: NotificationId, draft: NotificationDraft) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            target: draft.target,
            kind: draft.kind,
            message: draft.message,
            task_id: draft.task_id,
            read_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: NotificationId,
        target: UserId,
        kind: NotificationType,
        message: String,
        task_id: Option<TaskId>,
        read_at: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            target,
            kind,
            message,
            task_id,
            read_at,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Identity the notification is addressed to.
    pub fn target(&self) -> &UserId {
        &self.target
    }

    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }

    pub fn read_at(&self) -> Option<&Timestamp> {
        self.read_at.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.target == user
    }

    /// Stamp `readAt` with the given time. Re-reading refreshes the stamp.
    pub fn mark_read(&mut self, at: Timestamp) {
        self.read_at = Some(at);
        self.updated_at = at;
    }
}

/// Arguments for creating a notification, before it has an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub target: UserId,
    pub kind: NotificationType,
    pub message: String,
    pub task_id: Option<TaskId>,
}

impl NotificationDraft {
    pub fn new(
        target: UserId,
        kind: NotificationType,
        message: impl Into<String>,
        task_id: Option<TaskId>,
    ) -> Self {
        Self {
            target,
            kind,
            message: message.into(),
            task_id,
        }
    }

    /// A task was created with `target` as its assignee.
    pub fn assigned_on_create(target: UserId, task: &Task) -> Self {
        Self::new(
            target,
            NotificationType::Assigned,
            format!("New task assigned: {}", task.title()),
            Some(*task.id()),
        )
    }

    /// An existing task was (re)assigned to `target`.
    pub fn reassigned(target: UserId, task: &Task) -> Self {
        Self::new(
            target,
            NotificationType::Assigned,
            format!("Task assigned to you: {}", task.title()),
            Some(*task.id()),
        )
    }

    /// The Overseer edited a task `target` is involved in.
    pub fn task_edited(target: UserId, task: &Task, status_set: bool) -> Self {
        if status_set {
            Self::new(
                target,
                NotificationType::StatusChanged,
                format!("Task status changed to {}: {}", task.status(), task.title()),
                Some(*task.id()),
            )
        } else {
            Self::new(
                target,
                NotificationType::Updated,
                format!("Task updated: {}", task.title()),
                Some(*task.id()),
            )
        }
    }

    /// A task assigned to `target` was deleted.
    pub fn task_deleted(target: UserId, task: &Task) -> Self {
        Self::new(
            target,
            NotificationType::Updated,
            format!("Task deleted: {}", task.title()),
            Some(*task.id()),
        )
    }

    /// The assignee moved their own task.
    pub fn own_status_changed(target: UserId, task: &Task) -> Self {
        Self::new(
            target,
            NotificationType::StatusChanged,
            format!("Status updated to {}: {}", task.status(), task.title()),
            Some(*task.id()),
        )
    }
}
