//! SendMessageHandler - persist a direct message, then echo it to both sides.

use std::sync::Arc;

use crate::application::handlers::fanout::log_outcome;
use crate::domain::chat::{ChatError, ChatMessage};
use crate::domain::foundation::{MessageId, UserId};
use crate::ports::{Broadcaster, ChatMessageRepository, UserDirectory};

/// Command to send a direct message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Always the verified caller.
    pub from: UserId,
    pub to: UserId,
    pub message: String,
}

pub struct SendMessageHandler {
    messages: Arc<dyn ChatMessageRepository>,
    users: Arc<dyn UserDirectory>,
    broadcaster: Arc<dyn Broadcaster>,
}

impl SendMessageHandler {
    pub fn new(
        messages: Arc<dyn ChatMessageRepository>,
        users: Arc<dyn UserDirectory>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            messages,
            users,
            broadcaster,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<ChatMessage, ChatError> {
        let message = ChatMessage::new(MessageId::new(), cmd.from, cmd.to, &cmd.message)?;

        if self.users.find_by_id(message.to()).await?.is_none() {
            return Err(ChatError::UserNotFound(message.to().clone()));
        }

        self.messages.save(&message).await?;

        log_outcome(
            "chat:msg",
            self.broadcaster.broadcast_chat_message(&message).await,
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryChatMessageRepository, InMemoryUserDirectory};
    use crate::application::handlers::test_support::{Broadcast, RecordingBroadcaster};
    use crate::domain::chat::MAX_MESSAGE_LENGTH;
    use crate::domain::foundation::Role;
    use crate::domain::user::UserSummary;

    struct Fixture {
        messages: Arc<InMemoryChatMessageRepository>,
        broadcaster: Arc<RecordingBroadcaster>,
        handler: SendMessageHandler,
    }

    fn fixture() -> Fixture {
        let messages = Arc::new(InMemoryChatMessageRepository::new());
        let users = Arc::new(InMemoryUserDirectory::with_users([
            UserSummary::new(UserId::new("santa").unwrap(), "Santa", Role::Overseer),
            UserSummary::new(UserId::new("agent-42").unwrap(), "Pepper", Role::FieldAgent),
        ]));
        let broadcaster = Arc::new(RecordingBroadcaster::new());
        Fixture {
            handler: SendMessageHandler::new(messages.clone(), users, broadcaster.clone()),
            messages,
            broadcaster,
        }
    }

    fn command(to: &str, message: &str) -> SendMessageCommand {
        SendMessageCommand {
            from: UserId::new("agent-42").unwrap(),
            to: UserId::new(to).unwrap(),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn persists_then_broadcasts() {
        let f = fixture();
        let sent = f.handler.handle(command("santa", "Sleigh is ready")).await.unwrap();

        assert_eq!(sent.message(), "Sleigh is ready");
        assert_eq!(f.messages.len().await, 1);
        assert_eq!(f.broadcaster.calls(), vec![Broadcast::Chat(sent)]);
    }

    #[tokio::test]
    async fn long_message_is_truncated() {
        let f = fixture();
        let sent = f
            .handler
            .handle(command("santa", &"x".repeat(MAX_MESSAGE_LENGTH + 10)))
            .await
            .unwrap();
        assert_eq!(sent.message().chars().count(), MAX_MESSAGE_LENGTH);
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let f = fixture();
        let err = f.handler.handle(command("santa", "  \n ")).await.unwrap_err();
        assert!(matches!(err, ChatError::ValidationFailed { .. }));
        assert!(f.messages.is_empty().await);
        assert!(f.broadcaster.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_peer_is_rejected() {
        let f = fixture();
        let err = f.handler.handle(command("ghost", "hello?")).await.unwrap_err();
        assert_eq!(err, ChatError::UserNotFound(UserId::new("ghost").unwrap()));
        assert!(f.broadcaster.calls().is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_returned_without_broadcast() {
        let f = fixture();
        f.messages.fail_writes(true);
        let err = f.handler.handle(command("santa", "hi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Infrastructure(_)));
        assert!(f.broadcaster.calls().is_empty());
    }

    #[tokio::test]
    async fn broadcast_failure_still_returns_message() {
        let messages = Arc::new(InMemoryChatMessageRepository::new());
        let users = Arc::new(InMemoryUserDirectory::with_users([UserSummary::new(
            UserId::new("santa").unwrap(),
            "Santa",
            Role::Overseer,
        )]));
        let handler = SendMessageHandler::new(
            messages.clone(),
            users,
            Arc::new(RecordingBroadcaster::failing()),
        );

        assert!(handler.handle(command("santa", "hi")).await.is_ok());
        assert_eq!(messages.len().await, 1);
    }
}
