//! HTTP adapter for direct messages.

mod dto;
mod handlers;
mod routes;

pub use dto::{OverseerResponse, SendMessageRequest};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
