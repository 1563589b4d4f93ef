//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Role, UserId};
use crate::domain::user::UserSummary;
use crate::ports::UserDirectory;

use super::columns::{column, db_error, timestamp_column, user_column};

/// Reads the `users` table maintained by the account service.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserSummary>, DomainError> {
        let row = sqlx::query("SELECT id, username, role, created_at FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch user"))?;

        row.as_ref().map(row_to_summary).transpose()
    }

    async fn find_overseer(&self) -> Result<Option<UserSummary>, DomainError> {
        let row = sqlx::query(
            "SELECT id, username, role, created_at FROM users WHERE role = $1 ORDER BY username LIMIT 1",
        )
        .bind(Role::Overseer.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch overseer"))?;

        row.as_ref().map(row_to_summary).transpose()
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<UserSummary>, DomainError> {
        let rows =
            sqlx::query("SELECT id, username, role, created_at FROM users WHERE role = $1 ORDER BY username")
                .bind(role.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(db_error("list users by role"))?;

        rows.iter().map(row_to_summary).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn str_to_role(s: &str) -> Result<Role, DomainError> {
    match s {
        "OVERSEER" => Ok(Role::Overseer),
        "FIELD_AGENT" => Ok(Role::FieldAgent),
        other => Err(DomainError::database(format!("Invalid role: {}", other))),
    }
}

fn row_to_summary(row: &PgRow) -> Result<UserSummary, DomainError> {
    let role: String = column(row, "role")?;
    Ok(UserSummary::new(
        user_column(row, "id")?,
        column::<String>(row, "username")?,
        str_to_role(&role)?,
    )
    .registered_at(timestamp_column(row, "created_at")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_conversion_roundtrips() {
        for role in [Role::Overseer, Role::FieldAgent] {
            assert_eq!(str_to_role(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn str_to_role_rejects_unknown() {
        assert!(str_to_role("ADMIN").is_err());
    }
}
