//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresTaskRepository` - Task aggregates
//! - `PostgresNotificationRepository` - Per-identity notifications
//! - `PostgresChatMessageRepository` - Direct messages
//! - `PostgresUserDirectory` - Read-only account lookup
//!
//! Queries are checked at runtime (`sqlx::query` + binds) so the crate builds
//! without a live database.

mod chat_message_repository;
mod columns;
mod notification_repository;
mod task_repository;
mod user_directory;

pub use chat_message_repository::PostgresChatMessageRepository;
pub use notification_repository::PostgresNotificationRepository;
pub use task_repository::PostgresTaskRepository;
pub use user_directory::PostgresUserDirectory;
