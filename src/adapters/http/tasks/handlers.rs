//! HTTP handlers for task endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::task::{
    CreateTaskCommand, CreateTaskHandler, DeleteTaskCommand, DeleteTaskHandler,
    ListFieldAgentsHandler, ListFieldAgentsQuery, ListMyTasksHandler, ListMyTasksQuery,
    ListTasksHandler, ListTasksQuery, UpdateMyTaskStatusCommand, UpdateMyTaskStatusHandler,
    UpdateTaskCommand, UpdateTaskHandler,
};
use crate::domain::foundation::TaskId;
use crate::domain::task::TaskError;

use super::dto::{CreateTaskRequest, UpdateMyStatusRequest, UpdateTaskRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct TaskHandlers {
    create_handler: Arc<CreateTaskHandler>,
    update_handler: Arc<UpdateTaskHandler>,
    delete_handler: Arc<DeleteTaskHandler>,
    update_my_status_handler: Arc<UpdateMyTaskStatusHandler>,
    list_handler: Arc<ListTasksHandler>,
    list_mine_handler: Arc<ListMyTasksHandler>,
    list_agents_handler: Arc<ListFieldAgentsHandler>,
}

impl TaskHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateTaskHandler>,
        update_handler: Arc<UpdateTaskHandler>,
        delete_handler: Arc<DeleteTaskHandler>,
        update_my_status_handler: Arc<UpdateMyTaskStatusHandler>,
        list_handler: Arc<ListTasksHandler>,
        list_mine_handler: Arc<ListMyTasksHandler>,
        list_agents_handler: Arc<ListFieldAgentsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
            update_my_status_handler,
            list_handler,
            list_mine_handler,
            list_agents_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/tasks - Every task, most recently updated first (Overseer)
pub async fn list_tasks(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_handler.handle(ListTasksQuery { actor: user }).await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => handle_task_error(e),
    }
}

/// POST /api/tasks - Create a task (Overseer)
pub async fn create_task(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreateTaskRequest>,
) -> Response {
    let assignee = match req.assignee() {
        Ok(assignee) => assignee,
        Err(e) => return handle_task_error(e.into()),
    };

    let cmd = CreateTaskCommand {
        actor: user,
        title: req.title,
        description: req.description,
        priority: req.priority,
        due_at: req.due_at,
        assignee,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => (StatusCode::CREATED, Json(result.task)).into_response(),
        Err(e) => handle_task_error(e),
    }
}

/// PATCH /api/tasks/:task_id - Partial update (Overseer)
pub async fn update_task(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
    Path(task_id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Response {
    let task_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let patch = match req.into_patch() {
        Ok(patch) => patch,
        Err(e) => return handle_task_error(e.into()),
    };

    let cmd = UpdateTaskCommand {
        actor: user,
        task_id,
        patch,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(result.task)).into_response(),
        Err(e) => handle_task_error(e),
    }
}

/// DELETE /api/tasks/:task_id - Remove a task (Overseer)
pub async fn delete_task(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
    Path(task_id): Path<String>,
) -> Response {
    let task_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .delete_handler
        .handle(DeleteTaskCommand {
            actor: user,
            task_id,
        })
        .await
    {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_task_error(e),
    }
}

/// GET /api/tasks/agents - Assignable Field Agents (Overseer)
pub async fn list_field_agents(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list_agents_handler
        .handle(ListFieldAgentsQuery { actor: user })
        .await
    {
        Ok(agents) => (StatusCode::OK, Json(agents)).into_response(),
        Err(e) => handle_task_error(e),
    }
}

/// GET /api/tasks/my - The caller's tasks (Field Agent)
pub async fn list_my_tasks(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .list_mine_handler
        .handle(ListMyTasksQuery { actor: user })
        .await
    {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => handle_task_error(e),
    }
}

/// PATCH /api/tasks/my/:task_id/status - Move one's own task (Field Agent)
pub async fn update_my_task_status(
    State(handlers): State<TaskHandlers>,
    RequireAuth(user): RequireAuth,
    Path(task_id): Path<String>,
    Json(req): Json<UpdateMyStatusRequest>,
) -> Response {
    let task_id = match parse_task_id(&task_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateMyTaskStatusCommand {
        actor: user,
        task_id,
        status: req.status,
    };

    match handlers.update_my_status_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(result.task)).into_response(),
        Err(e) => handle_task_error(e),
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, Response> {
    raw.parse::<TaskId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid task ID")),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_task_error(error: TaskError) -> Response {
    match error {
        TaskError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Task", &id.to_string())),
        )
            .into_response(),
        TaskError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Forbidden")),
        )
            .into_response(),
        TaskError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(&field, message)),
        )
            .into_response(),
        TaskError::Conflict(id) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "Task {} kept changing; reload and retry",
                id
            ))),
        )
            .into_response(),
        TaskError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Task request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
