//! Direct message entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp, UserId, ValidationError};

/// Longest stored message body, in characters. Longer input is cut, not rejected.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// A persisted one-to-one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(rename = "_id")]
    id: MessageId,
    #[serde(rename = "fromUserId")]
    from: UserId,
    #[serde(rename = "toUserId")]
    to: UserId,
    message: String,
    created_at: Timestamp,
}

impl ChatMessage {
    /// Build a new message, truncating the body to [`MAX_MESSAGE_LENGTH`].
    ///
    /// # Errors
    ///
    /// - `ValidationError::EmptyField` when the (truncated) body is blank
    pub fn new(
        id: MessageId,
        from: UserId,
        to: UserId,
        body: &str,
    ) -> Result<Self, ValidationError> {
        let message = truncate(body, MAX_MESSAGE_LENGTH);
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        Ok(Self {
            id,
            from,
            to,
            message,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute from persistence.
    pub fn reconstitute(
        id: MessageId,
        from: UserId,
        to: UserId,
        message: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            from,
            to,
            message,
            created_at,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn from(&self) -> &UserId {
        &self.from
    }

    pub fn to(&self) -> &UserId {
        &self.to
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// True when the message belongs to the conversation between `a` and `b`.
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
