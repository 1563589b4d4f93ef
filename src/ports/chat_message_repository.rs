//! Chat message repository port.

use async_trait::async_trait;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId};

/// Repository port for direct messages.
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Persist a message.
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError>;

    /// Messages exchanged between `a` and `b` in either direction,
    /// oldest first, at most `limit`.
    async fn find_conversation(
        &self,
        a: &UserId,
        b: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_message_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ChatMessageRepository) {}
    }
}
