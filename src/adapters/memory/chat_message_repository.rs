//! In-memory chat message repository.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ChatMessageRepository;

/// In-memory storage for direct messages, kept in send order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChatMessageRepository {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryChatMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `DatabaseError` (for tests).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("chat store unavailable"));
        }
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn find_conversation(
        &self,
        a: &UserId,
        b: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.is_between(a, b))
            .take(limit)
            .cloned()
            .collect())
    }
}
