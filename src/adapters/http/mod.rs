//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own adapter (DTOs, handler state, routes); `router`
//! composes them under `/api` together with the realtime upgrade route.

pub mod admin;
pub mod chat;
pub mod error;
pub mod middleware;
pub mod notifications;
pub mod router;
pub mod tasks;

pub use admin::{admin_routes, AdminHandlers};
pub use chat::{chat_routes, ChatHandlers};
pub use error::ErrorResponse;
pub use notifications::{notification_routes, NotificationHandlers};
pub use router::{api_router, health, ApiRoutes, HealthResponse};
pub use tasks::{task_routes, TaskHandlers};
