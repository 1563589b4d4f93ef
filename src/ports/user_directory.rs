//! User directory port (read-only).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::UserSummary;

/// Lookup of registered accounts. Accounts are managed elsewhere.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserSummary>, DomainError>;

    /// The Overseer account, if one is registered.
    async fn find_overseer(&self) -> Result<Option<UserSummary>, DomainError>;

    /// All users holding `role`, ordered by username.
    async fn list_by_role(&self, role: Role) -> Result<Vec<UserSummary>, DomainError>;
}
