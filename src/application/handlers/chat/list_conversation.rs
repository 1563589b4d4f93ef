//! ListConversationHandler - both directions of a direct conversation.

use std::sync::Arc;

use crate::domain::chat::{ChatError, ChatMessage};
use crate::domain::foundation::UserId;
use crate::ports::ChatMessageRepository;

/// Upper bound on messages returned for one conversation.
pub const MAX_CONVERSATION_MESSAGES: usize = 500;

#[derive(Debug, Clone)]
pub struct ListConversationQuery {
    pub me: UserId,
    pub peer: UserId,
}

pub struct ListConversationHandler {
    messages: Arc<dyn ChatMessageRepository>,
}

impl ListConversationHandler {
    pub fn new(messages: Arc<dyn ChatMessageRepository>) -> Self {
        Self { messages }
    }

    /// Oldest first.
    pub async fn handle(&self, query: ListConversationQuery) -> Result<Vec<ChatMessage>, ChatError> {
        Ok(self
            .messages
            .find_conversation(&query.me, &query.peer, MAX_CONVERSATION_MESSAGES)
            .await?)
    }
}
