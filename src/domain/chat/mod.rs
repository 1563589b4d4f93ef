//! Direct messaging between two identities.

mod errors;
mod message;

pub use errors::ChatError;
pub use message::{ChatMessage, MAX_MESSAGE_LENGTH};
