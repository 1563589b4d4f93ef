//! In-memory persistence adapters.
//!
//! Back the repository ports with `tokio::sync::RwLock` maps. Used by the
//! test suites and by the binary when no database URL is configured.

mod chat_message_repository;
mod notification_repository;
mod task_repository;
mod user_directory;

pub use chat_message_repository::InMemoryChatMessageRepository;
pub use notification_repository::InMemoryNotificationRepository;
pub use task_repository::InMemoryTaskRepository;
pub use user_directory::InMemoryUserDirectory;
