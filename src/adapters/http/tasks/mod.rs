//! HTTP adapter for task endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateTaskRequest, UpdateMyStatusRequest, UpdateTaskRequest};
pub use handlers::TaskHandlers;
pub use routes::task_routes;
