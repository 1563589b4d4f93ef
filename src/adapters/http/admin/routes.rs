//! HTTP routes for admin endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_analytics, list_agent_accounts, list_agent_tasks, AdminHandlers};

/// Creates the admin router. Mounted under `/api/admin`.
pub fn admin_routes(handlers: AdminHandlers) -> Router {
    Router::new()
        .route("/analytics", get(get_analytics))
        .route("/agents", get(list_agent_accounts))
        .route("/agents/:user_id/tasks", get(list_agent_tasks))
        .with_state(handlers)
}
