//! HTTP DTOs for task endpoints.
//!
//! Responses reuse the task snapshot shape (`Task` serializes to it), so only
//! request bodies live here.

use serde::{Deserialize, Deserializer};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::task::{TaskPatch, TaskPriority, TaskStatus};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_at: Option<Timestamp>,
    #[serde(default)]
    pub assignee_user_id: Option<String>,
}

impl CreateTaskRequest {
    /// Blank means unassigned.
    pub fn assignee(&self) -> Result<Option<UserId>, ValidationError> {
        parse_assignee(self.assignee_user_id.as_deref())
    }
}

/// Partial update. A present `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_at: Option<Option<Timestamp>>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee_user_id: Option<Option<String>>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, ValidationError> {
        let assignee = match self.assignee_user_id {
            None => None,
            Some(raw) => Some(parse_assignee(raw.as_deref())?),
        };
        Ok(TaskPatch {
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            due_at: self.due_at,
            assignee,
        })
    }
}

/// Request body for a Field Agent's own status change.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMyStatusRequest {
    pub status: TaskStatus,
}

fn parse_assignee(raw: Option<&str>) -> Result<Option<UserId>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) => UserId::new(id)
            .map(Some)
            .map_err(|_| ValidationError::invalid_format("assigneeUserId", "Invalid assigneeUserId")),
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
