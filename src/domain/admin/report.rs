//! Dashboard figures computed from a snapshot of the stores.

use std::collections::HashMap;

use crate::domain::foundation::UserId;
use crate::domain::task::{Task, TaskStatus};
use crate::domain::user::UserSummary;

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub total: u64,
    pub open: u64,
    pub in_progress: u64,
    pub completed: u64,
}

impl StatusTotals {
    fn record(&mut self, status: TaskStatus) {
        self.total += 1;
        match status {
            TaskStatus::Open => self.open += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }
}

/// Unfinished tasks held by one Field Agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentWorkload {
    pub user_id: UserId,
    pub username: String,
    pub open_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub tasks: StatusTotals,
    /// Busiest first; ties by username.
    pub agents: Vec<AgentWorkload>,
    pub unread_notifications: u64,
}

impl AnalyticsReport {
    /// Every agent in `agents` gets a row, including those with nothing
    /// open. Tasks assigned to accounts outside `agents` only count in the
    /// status totals.
    pub fn compile(tasks: &[Task], agents: &[UserSummary], unread_notifications: u64) -> Self {
        let mut totals = StatusTotals::default();
        let mut open_by_agent: HashMap<&UserId, u64> = HashMap::new();

        for task in tasks {
            totals.record(task.status());
            if task.status() == TaskStatus::Completed {
                continue;
            }
            if let Some(assignee) = task.assignee() {
                *open_by_agent.entry(assignee).or_default() += 1;
            }
        }

        let mut workloads: Vec<AgentWorkload> = agents
            .iter()
            .map(|agent| AgentWorkload {
                user_id: agent.id.clone(),
                username: agent.username.clone(),
                open_count: open_by_agent.get(&agent.id).copied().unwrap_or(0),
            })
            .collect();
        workloads.sort_by(|a, b| {
            b.open_count
                .cmp(&a.open_count)
                .then_with(|| a.username.cmp(&b.username))
        });

        Self {
            tasks: totals,
            agents: workloads,
            unread_notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, TaskId};
    use crate::domain::task::TaskPriority;

    fn agent(id: &str) -> UserSummary {
        UserSummary::new(UserId::new(id).unwrap(), id, Role::FieldAgent)
    }

    fn task(assignee: Option<&str>, status: TaskStatus) -> Task {
        let santa = UserId::new("santa").unwrap();
        let mut task = Task::new(
            TaskId::new(),
            "Wrap".to_string(),
            None,
            TaskPriority::Medium,
            None,
            assignee.map(|a| UserId::new(a).unwrap()),
            santa.clone(),
        )
        .unwrap();
        if status != TaskStatus::Open {
            task.set_status(status, &santa).unwrap();
        }
        task
    }

    #[test]
    fn totals_cover_every_status() {
        let tasks = [
            task(None, TaskStatus::Open),
            task(Some("pepper"), TaskStatus::InProgress),
            task(Some("pepper"), TaskStatus::Completed),
            task(Some("pepper"), TaskStatus::Completed),
        ];
        let report = AnalyticsReport::compile(&tasks, &[], 3);

        assert_eq!(
            report.tasks,
            StatusTotals {
                total: 4,
                open: 1,
                in_progress: 1,
                completed: 2,
            }
        );
        assert_eq!(report.unread_notifications, 3);
        assert!(report.agents.is_empty());
    }

    #[test]
    fn workloads_count_unfinished_tasks_busiest_first() {
        let tasks = [
            task(Some("wunorse"), TaskStatus::Open),
            task(Some("wunorse"), TaskStatus::InProgress),
            task(Some("wunorse"), TaskStatus::Completed),
            task(Some("pepper"), TaskStatus::Open),
            task(Some("someone-else"), TaskStatus::Open),
        ];
        let agents = [agent("alabaster"), agent("pepper"), agent("wunorse"), agent("bushy")];

        let report = AnalyticsReport::compile(&tasks, &agents, 0);
        let rows: Vec<_> = report
            .agents
            .iter()
            .map(|w| (w.username.as_str(), w.open_count))
            .collect();
        assert_eq!(
            rows,
            vec![("wunorse", 2), ("pepper", 1), ("alabaster", 0), ("bushy", 0)]
        );
        assert_eq!(report.tasks.total, 5);
    }
}
