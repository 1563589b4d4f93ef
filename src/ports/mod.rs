//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `TaskRepository` - Task storage and snapshot lookup
//! - `NotificationRepository` - Notification storage
//! - `ChatMessageRepository` - Direct message storage
//! - `UserDirectory` - Read-only account lookup
//!
//! ## Realtime Ports
//!
//! - `SessionValidator` - Credential verification for REST and realtime
//! - `Broadcaster` - Room-scoped fan-out of committed changes

mod broadcaster;
mod chat_message_repository;
mod notification_repository;
mod session_validator;
mod task_repository;
mod user_directory;

pub use broadcaster::{BroadcastError, Broadcaster, DeliveryReport, TaskChange};
pub use chat_message_repository::ChatMessageRepository;
pub use notification_repository::NotificationRepository;
pub use session_validator::SessionValidator;
pub use task_repository::TaskRepository;
pub use user_directory::UserDirectory;
