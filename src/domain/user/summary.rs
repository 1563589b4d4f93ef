use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, Timestamp, UserId};

/// Public projection of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub username: String,
    pub role: Role,
    /// Registration time, when the account store records one.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl UserSummary {
    pub fn new(id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
            created_at: None,
        }
    }

    pub fn registered_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }
}
