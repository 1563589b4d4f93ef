//! HTTP DTOs for admin endpoints.
//!
//! Account listings reuse `UserSummary`, which already serializes as
//! `{ _id, username, role, createdAt }`.

use serde::{Deserialize, Serialize};

use crate::domain::admin::{AgentWorkload, AnalyticsReport, StatusTotals};

/// Body of `GET /api/admin/analytics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub tasks: TaskTotalsResponse,
    pub agents: Vec<AgentWorkloadResponse>,
    pub notifications: UnreadResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTotalsResponse {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentWorkloadResponse {
    pub user_id: String,
    pub username: String,
    pub open_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnreadResponse {
    pub unread: u64,
}

impl From<StatusTotals> for TaskTotalsResponse {
    fn from(totals: StatusTotals) -> Self {
        Self {
            total: totals.total,
            open: totals.open,
            in_progress: totals.in_progress,
            completed: totals.completed,
        }
    }
}

impl From<AgentWorkload> for AgentWorkloadResponse {
    fn from(workload: AgentWorkload) -> Self {
        Self {
            user_id: workload.user_id.as_str().to_string(),
            username: workload.username,
            open_count: workload.open_count,
        }
    }
}

impl From<AnalyticsReport> for AnalyticsResponse {
    fn from(report: AnalyticsReport) -> Self {
        Self {
            tasks: report.tasks.into(),
            agents: report.agents.into_iter().map(Into::into).collect(),
            notifications: UnreadResponse {
                unread: report.unread_notifications,
            },
        }
    }
}
