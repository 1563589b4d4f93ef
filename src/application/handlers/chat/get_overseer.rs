//! GetOverseerHandler - who Field Agents message by default.

use std::sync::Arc;

use crate::domain::chat::ChatError;
use crate::domain::user::UserSummary;
use crate::ports::UserDirectory;

pub struct GetOverseerHandler {
    users: Arc<dyn UserDirectory>,
}

impl GetOverseerHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn handle(&self) -> Result<UserSummary, ChatError> {
        self.users
            .find_overseer()
            .await?
            .ok_or(ChatError::OverseerMissing)
    }
}
