//! HTTP DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::user::UserSummary;

/// Request body for sending a direct message.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

/// Minimal Overseer contact card.
#[derive(Debug, Clone, Serialize)]
pub struct OverseerResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl From<UserSummary> for OverseerResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};

    #[test]
    fn overseer_response_omits_role() {
        let response = OverseerResponse::from(UserSummary::new(
            UserId::new("santa").unwrap(),
            "Santa",
            Role::Overseer,
        ));
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json, serde_json::json!({ "_id": "santa", "username": "Santa" }));
    }

    #[test]
    fn missing_message_defaults_to_empty() {
        let req: SendMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_empty());
    }
}
