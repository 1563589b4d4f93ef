//! ListAgentTasksHandler - one Field Agent's tasks, for the Overseer.

use std::sync::Arc;

use crate::domain::admin::AdminError;
use crate::domain::foundation::{AuthenticatedUser, Role, UserId};
use crate::domain::task::Task;
use crate::ports::{TaskRepository, UserDirectory};

#[derive(Debug, Clone)]
pub struct ListAgentTasksQuery {
    pub actor: AuthenticatedUser,
    pub agent_id: UserId,
}

pub struct ListAgentTasksHandler {
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserDirectory>,
}

impl ListAgentTasksHandler {
    pub fn new(tasks: Arc<dyn TaskRepository>, users: Arc<dyn UserDirectory>) -> Self {
        Self { tasks, users }
    }

    /// Most recently updated first. Ids that do not name a Field Agent are
    /// reported as missing, the Overseer's included.
    pub async fn handle(&self, query: ListAgentTasksQuery) -> Result<Vec<Task>, AdminError> {
        query.actor.require_role(Role::Overseer)?;

        match self.users.find_by_id(&query.agent_id).await? {
            Some(user) if user.role == Role::FieldAgent => {}
            _ => return Err(AdminError::AgentNotFound(query.agent_id)),
        }

        Ok(self.tasks.find_by_assignee(&query.agent_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryTaskRepository, InMemoryUserDirectory};
    use crate::application::handlers::test_support::{agent, open_task, overseer};
    use crate::domain::user::UserSummary;

    async fn handler() -> ListAgentTasksHandler {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        tasks.save(&open_task("sleigh", Some("elf01"))).await.unwrap();
        tasks.save(&open_task("cocoa", Some("elf02"))).await.unwrap();
        let users = Arc::new(InMemoryUserDirectory::with_users([
            UserSummary::new(UserId::new("santa").unwrap(), "santa", Role::Overseer),
            UserSummary::new(UserId::new("elf01").unwrap(), "elf01", Role::FieldAgent),
        ]));
        ListAgentTasksHandler::new(tasks, users)
    }

    fn query(actor: AuthenticatedUser, agent_id: &str) -> ListAgentTasksQuery {
        ListAgentTasksQuery {
            actor,
            agent_id: UserId::new(agent_id).unwrap(),
        }
    }

    #[tokio::test]
    async fn lists_only_that_agents_tasks() {
        let tasks = handler().await.handle(query(overseer(), "elf01")).await.unwrap();
        let titles: Vec<_> = tasks.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["sleigh"]);
    }

    #[tokio::test]
    async fn non_agent_ids_are_not_found() {
        let handler = handler().await;
        for id in ["elf02", "santa"] {
            let err = handler.handle(query(overseer(), id)).await.unwrap_err();
            assert_eq!(err, AdminError::AgentNotFound(UserId::new(id).unwrap()));
        }
    }

    #[tokio::test]
    async fn field_agent_is_forbidden() {
        let err = handler()
            .await
            .handle(query(agent("elf01"), "elf01"))
            .await
            .unwrap_err();
        assert_eq!(err, AdminError::Forbidden);
    }
}
