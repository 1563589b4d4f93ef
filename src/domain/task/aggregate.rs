//! Task aggregate entity.
//!
//! Tasks are created by the Overseer and optionally assigned to a single
//! Field Agent. The serialized form of this struct is the task snapshot
//! pushed to clients and returned by the REST endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, TaskId, Timestamp, UserId, ValidationError};

use super::{TaskPriority, TaskStatus};

/// Maximum length for a task title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a task description.
pub const MAX_DESCRIPTION_LENGTH: usize = 4000;

/// Task aggregate.
///
/// # Invariants
///
/// - `title` is 1-200 characters, non-blank
/// - `description`, when present, is at most 4000 characters
/// - `status` is one of the three [`TaskStatus`] values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    id: TaskId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    due_at: Option<Timestamp>,
    #[serde(rename = "assigneeUserId")]
    assignee: Option<UserId>,
    #[serde(rename = "createdByUserId")]
    created_by: UserId,
    #[serde(rename = "updatedByUserId")]
    updated_by: UserId,
    created_at: Timestamp,
    updated_at: Timestamp,
    /// Count of committed writes; repositories refuse a write whose version
    /// no longer matches the stored row.
    #[serde(skip)]
    version: u64,
}

/// Partial update applied by the Overseer.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears a nullable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub due_at: Option<Option<Timestamp>>,
    pub assignee: Option<Option<UserId>>,
}

/// What an applied patch changed, as needed for deriving notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub previous_assignee: Option<UserId>,
    pub current_assignee: Option<UserId>,
    pub status_set: bool,
}

impl PatchOutcome {
    /// The assignee is new and non-null.
    pub fn newly_assigned(&self) -> Option<&UserId> {
        match &self.current_assignee {
            Some(current) if self.previous_assignee.as_ref() != Some(current) => Some(current),
            _ => None,
        }
    }

    /// Union of previous and current assignee, without duplicates.
    pub fn impacted(&self) -> Vec<UserId> {
        let mut impacted = Vec::with_capacity(2);
        for id in [&self.previous_assignee, &self.current_assignee].into_iter().flatten() {
            if !impacted.contains(id) {
                impacted.push(id.clone());
            }
        }
        impacted
    }
}

impl Task {
    /// Create a new open task.
    ///
    /// # Errors
    ///
    /// - `ValidationError` if title or description violate length rules
    pub fn new(
        id: TaskId,
        title: String,
        description: Option<String>,
        priority: TaskPriority,
        due_at: Option<Timestamp>,
        assignee: Option<UserId>,
        created_by: UserId,
    ) -> Result<Self, ValidationError> {
        let title = Self::validate_title(title)?;
        let description = Self::validate_description(description)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            title,
            description,
            status: TaskStatus::Open,
            priority,
            due_at,
            assignee,
            updated_by: created_by.clone(),
            created_by,
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    /// Reconstitute a task from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: TaskId,
        title: String,
        description: Option<String>,
        status: TaskStatus,
        priority: TaskPriority,
        due_at: Option<Timestamp>,
        assignee: Option<UserId>,
        created_by: UserId,
        updated_by: UserId,
        created_at: Timestamp,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        Self {
            id,
            title,
            description,
            status,
            priority,
            due_at,
            assignee,
            created_by,
            updated_by,
            created_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn due_at(&self) -> Option<&Timestamp> {
        self.due_at.as_ref()
    }

    /// Current assignee, if any.
    pub fn assignee(&self) -> Option<&UserId> {
        self.assignee.as_ref()
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn updated_by(&self) -> &UserId {
        &self.updated_by
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns true if `user` is the current assignee.
    pub fn is_assigned_to(&self, user: &UserId) -> bool {
        self.assignee.as_ref() == Some(user)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the status. Setting the current status again is a no-op.
    pub fn set_status(&mut self, status: TaskStatus, actor: &UserId) -> Result<(), ValidationError> {
        if status != self.status {
            self.status = self.status.transition_to(status)?;
        }
        self.touch(actor);
        Ok(())
    }

    /// Apply a partial update. Validation happens before any field changes.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        actor: &UserId,
    ) -> Result<PatchOutcome, ValidationError> {
        let title = patch.title.map(Self::validate_title).transpose()?;
        let description = patch
            .description
            .map(Self::validate_description)
            .transpose()?;
        if let Some(status) = patch.status {
            if status != self.status {
                self.status.transition_to(status)?;
            }
        }

        let previous_assignee = self.assignee.clone();

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(due_at) = patch.due_at {
            self.due_at = due_at;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        self.touch(actor);

        Ok(PatchOutcome {
            previous_assignee,
            current_assignee: self.assignee.clone(),
            status_set: patch.status.is_some(),
        })
    }

    /// The task as stored after a successful write.
    pub(crate) fn committed(mut self) -> Self {
        self.version += 1;
        self
    }

    fn touch(&mut self, actor: &UserId) {
        self.updated_by = actor.clone();
        self.updated_at = Timestamp::now();
    }

    fn validate_title(title: String) -> Result<String, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, len));
        }
        Ok(title)
    }

    fn validate_description(
        description: Option<String>,
    ) -> Result<Option<String>, ValidationError> {
        if let Some(text) = &description {
            let len = text.chars().count();
            if len > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::too_long(
                    "description",
                    MAX_DESCRIPTION_LENGTH,
                    len,
                ));
            }
        }
        Ok(description)
    }
}
