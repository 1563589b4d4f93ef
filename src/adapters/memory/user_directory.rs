//! In-memory user directory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::UserSummary;
use crate::ports::UserDirectory;

/// Fixed set of accounts, seeded at startup or by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<Vec<UserSummary>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from a list of accounts.
    pub fn with_users(users: impl IntoIterator<Item = UserSummary>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserSummary>, DomainError> {
        Ok(self.users.read().await.iter().find(|u| &u.id == id).cloned())
    }

    async fn find_overseer(&self) -> Result<Option<UserSummary>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.role == Role::Overseer)
            .cloned())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<UserSummary>, DomainError> {
        let mut users: Vec<UserSummary> = self
            .users
            .read()
            .await
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str, role: Role) -> UserSummary {
        UserSummary::new(UserId::new(id).unwrap(), name, role)
    }

    #[tokio::test]
    async fn lists_role_sorted_by_username() {
        let dir = InMemoryUserDirectory::with_users([
            summary("s", "Santa", Role::Overseer),
            summary("b", "Bushy", Role::FieldAgent),
            summary("a", "Alabaster", Role::FieldAgent),
        ]);

        let agents = dir.list_by_role(Role::FieldAgent).await.unwrap();
        let names: Vec<_> = agents.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["Alabaster", "Bushy"]);
        assert_eq!(dir.find_overseer().await.unwrap().unwrap().username, "Santa");
    }

    #[tokio::test]
    async fn empty_directory_has_no_overseer() {
        let dir = InMemoryUserDirectory::new();
        assert!(dir.find_overseer().await.unwrap().is_none());
        assert!(dir.find_by_id(&UserId::new("a").unwrap()).await.unwrap().is_none());
    }
}
