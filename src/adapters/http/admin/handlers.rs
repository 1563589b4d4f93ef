//! HTTP handlers for admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::admin::{
    GetAnalyticsHandler, GetAnalyticsQuery, ListAgentAccountsHandler, ListAgentAccountsQuery,
    ListAgentTasksHandler, ListAgentTasksQuery,
};
use crate::domain::admin::AdminError;
use crate::domain::foundation::UserId;

use super::dto::AnalyticsResponse;

#[derive(Clone)]
pub struct AdminHandlers {
    analytics_handler: Arc<GetAnalyticsHandler>,
    accounts_handler: Arc<ListAgentAccountsHandler>,
    agent_tasks_handler: Arc<ListAgentTasksHandler>,
}

impl AdminHandlers {
    pub fn new(
        analytics_handler: Arc<GetAnalyticsHandler>,
        accounts_handler: Arc<ListAgentAccountsHandler>,
        agent_tasks_handler: Arc<ListAgentTasksHandler>,
    ) -> Self {
        Self {
            analytics_handler,
            accounts_handler,
            agent_tasks_handler,
        }
    }
}

/// GET /api/admin/analytics - Status totals, agent workloads, unread count
pub async fn get_analytics(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .analytics_handler
        .handle(GetAnalyticsQuery { actor: user })
        .await
    {
        Ok(report) => (StatusCode::OK, Json(AnalyticsResponse::from(report))).into_response(),
        Err(e) => handle_admin_error(e),
    }
}

/// GET /api/admin/agents - Field Agent accounts
pub async fn list_agent_accounts(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers
        .accounts_handler
        .handle(ListAgentAccountsQuery { actor: user })
        .await
    {
        Ok(accounts) => (StatusCode::OK, Json(accounts)).into_response(),
        Err(e) => handle_admin_error(e),
    }
}

/// GET /api/admin/agents/:user_id/tasks - One agent's tasks
pub async fn list_agent_tasks(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Path(user_id): Path<String>,
) -> Response {
    let Ok(agent_id) = UserId::new(user_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid user ID")),
        )
            .into_response();
    };

    match handlers
        .agent_tasks_handler
        .handle(ListAgentTasksQuery {
            actor: user,
            agent_id,
        })
        .await
    {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(e) => handle_admin_error(e),
    }
}

fn handle_admin_error(error: AdminError) -> Response {
    match error {
        AdminError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Forbidden")),
        )
            .into_response(),
        AdminError::AgentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Field Agent", id.as_str())),
        )
            .into_response(),
        AdminError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Admin request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response()
        }
    }
}
