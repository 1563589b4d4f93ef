//! ListAgentAccountsHandler - Field Agent accounts with registration times.

use std::sync::Arc;

use crate::domain::admin::AdminError;
use crate::domain::foundation::{AuthenticatedUser, Role};
use crate::domain::user::UserSummary;
use crate::ports::UserDirectory;

#[derive(Debug, Clone)]
pub struct ListAgentAccountsQuery {
    pub actor: AuthenticatedUser,
}

pub struct ListAgentAccountsHandler {
    users: Arc<dyn UserDirectory>,
}

impl ListAgentAccountsHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Ordered by username.
    pub async fn handle(
        &self,
        query: ListAgentAccountsQuery,
    ) -> Result<Vec<UserSummary>, AdminError> {
        query.actor.require_role(Role::Overseer)?;
        Ok(self.users.list_by_role(Role::FieldAgent).await?)
    }
}
