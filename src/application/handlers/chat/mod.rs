//! Direct message handlers.

mod get_overseer;
mod list_conversation;
mod send_message;

pub use get_overseer::GetOverseerHandler;
pub use list_conversation::{
    ListConversationHandler, ListConversationQuery, MAX_CONVERSATION_MESSAGES,
};
pub use send_message::{SendMessageCommand, SendMessageHandler};
