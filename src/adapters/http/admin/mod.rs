//! HTTP adapter for the Overseer's admin endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AgentWorkloadResponse, AnalyticsResponse, TaskTotalsResponse, UnreadResponse};
pub use handlers::AdminHandlers;
pub use routes::admin_routes;
