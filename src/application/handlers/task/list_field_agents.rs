//! ListFieldAgentsHandler - assignable accounts for the Overseer.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::task::TaskError;
use crate::domain::user::UserSummary;
use crate::ports::UserDirectory;

#[derive(Debug, Clone)]
pub struct ListFieldAgentsQuery {
    pub actor: AuthenticatedUser,
}

pub struct ListFieldAgentsHandler {
    users: Arc<dyn UserDirectory>,
}

impl ListFieldAgentsHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Field Agents ordered by username.
    pub async fn handle(&self, query: ListFieldAgentsQuery) -> Result<Vec<UserSummary>, TaskError> {
        query.actor.require_role(Role::Overseer)?;
        Ok(self.users.list_by_role(Role::FieldAgent).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryUserDirectory;
    use crate::application::handlers::test_support::{agent, overseer};
    use crate::domain::foundation::UserId;

    fn directory() -> Arc<InMemoryUserDirectory> {
        Arc::new(InMemoryUserDirectory::with_users([
            UserSummary::new(UserId::new("santa").unwrap(), "Santa", Role::Overseer),
            UserSummary::new(UserId::new("e2").unwrap(), "Wunorse", Role::FieldAgent),
            UserSummary::new(UserId::new("e1").unwrap(), "Pepper", Role::FieldAgent),
        ]))
    }

    #[tokio::test]
    async fn lists_agents_by_username() {
        let handler = ListFieldAgentsHandler::new(directory());
        let agents = handler
            .handle(ListFieldAgentsQuery { actor: overseer() })
            .await
            .unwrap();
        let names: Vec<_> = agents.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Pepper", "Wunorse"]);
    }

    #[tokio::test]
    async fn agent_cannot_list_agents() {
        let handler = ListFieldAgentsHandler::new(directory());
        let err = handler
            .handle(ListFieldAgentsQuery { actor: agent("e1") })
            .await
            .unwrap_err();
        assert_eq!(err, TaskError::Forbidden);
    }
}
