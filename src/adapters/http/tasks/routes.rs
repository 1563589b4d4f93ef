//! HTTP routes for task endpoints.

use axum::{
    routing::{get, patch},
    Router,
};

use super::handlers::{
    create_task, delete_task, list_field_agents, list_my_tasks, list_tasks, update_my_task_status,
    update_task, TaskHandlers,
};

/// Creates the task router. Mounted under `/api/tasks`.
pub fn task_routes(handlers: TaskHandlers) -> Router {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/agents", get(list_field_agents))
        .route("/my", get(list_my_tasks))
        .route("/my/:task_id/status", patch(update_my_task_status))
        .route("/:task_id", patch(update_task).delete(delete_task))
        .with_state(handlers)
}
