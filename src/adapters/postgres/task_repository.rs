//! PostgreSQL implementation of TaskRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, TaskId, Timestamp, UserId};
use crate::domain::task::{Task, TaskStatus};
use crate::ports::TaskRepository;

use super::columns::{
    column, db_error, optional_timestamp_column, optional_user_column, parse_column,
    timestamp_column, user_column,
};

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_at, assignee_user_id, \
     created_by_user_id, updated_by_user_id, created_at, updated_at, version";

/// PostgreSQL implementation of TaskRepository.
#[derive(Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, task: &Task) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, title, description, status, priority, due_at, assignee_user_id,
                created_by_user_id, updated_by_user_id, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(task.id().as_uuid())
        .bind(task.title())
        .bind(task.description())
        .bind(task.status().as_str())
        .bind(task.priority().as_str())
        .bind(task.due_at().map(|t| *t.as_datetime()))
        .bind(task.assignee().map(UserId::as_str))
        .bind(task.created_by().as_str())
        .bind(task.updated_by().as_str())
        .bind(task.created_at().as_datetime())
        .bind(task.updated_at().as_datetime())
        .bind(version_column(task.version())?)
        .execute(&self.pool)
        .await
        .map_err(db_error("insert task"))?;

        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks SET
                title = $2,
                description = $3,
                status = $4,
                priority = $5,
                due_at = $6,
                assignee_user_id = $7,
                updated_by_user_id = $8,
                updated_at = $9,
                version = version + 1
            WHERE id = $1 AND version = $10
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(task.id().as_uuid())
        .bind(task.title())
        .bind(task.description())
        .bind(task.status().as_str())
        .bind(task.priority().as_str())
        .bind(task.due_at().map(|t| *t.as_datetime()))
        .bind(task.assignee().map(UserId::as_str))
        .bind(task.updated_by().as_str())
        .bind(task.updated_at().as_datetime())
        .bind(version_column(task.version())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update task"))?;

        match row {
            Some(row) => row_to_task(&row),
            None if self.exists(task.id()).await? => Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Task {} changed since it was loaded", task.id()),
            )),
            None => Err(not_found(task.id())),
        }
    }

    async fn set_status(
        &self,
        id: &TaskId,
        assignee: &UserId,
        status: TaskStatus,
    ) -> Result<Task, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE tasks SET
                status = $3,
                updated_by_user_id = $2,
                updated_at = $4,
                version = version + 1
            WHERE id = $1 AND assignee_user_id = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(assignee.as_str())
        .bind(status.as_str())
        .bind(Timestamp::now().as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("update task status"))?;

        match row {
            Some(row) => row_to_task(&row),
            None if self.exists(id).await? => Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Task {} is not assigned to {}", id, assignee),
            )),
            None => Err(not_found(id)),
        }
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch task"))?;

        row.as_ref().map(row_to_task).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tasks ORDER BY updated_at DESC",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list tasks"))?;

        rows.iter().map(row_to_task).collect()
    }

    async fn find_by_assignee(&self, assignee: &UserId) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM tasks WHERE assignee_user_id = $1 ORDER BY updated_at DESC",
            TASK_COLUMNS
        ))
        .bind(assignee.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch tasks by assignee"))?;

        rows.iter().map(row_to_task).collect()
    }

    async fn delete(&self, id: &TaskId) -> Result<Task, DomainError> {
        let row = sqlx::query(&format!(
            "DELETE FROM tasks WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("delete task"))?;

        match row {
            Some(row) => row_to_task(&row),
            None => Err(not_found(id)),
        }
    }
}

impl PostgresTaskRepository {
    /// Tells a missing row apart from a guarded update that matched nothing.
    async fn exists(&self, id: &TaskId) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tasks WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check task"))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn not_found(id: &TaskId) -> DomainError {
    DomainError::new(ErrorCode::TaskNotFound, format!("Task not found: {}", id))
}

fn version_column(version: u64) -> Result<i64, DomainError> {
    i64::try_from(version).map_err(|_| DomainError::database("task version out of range"))
}

fn row_to_task(row: &PgRow) -> Result<Task, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let version: i64 = column(row, "version")?;
    Ok(Task::reconstitute(
        TaskId::from_uuid(id),
        column(row, "title")?,
        column(row, "description")?,
        parse_column(row, "status")?,
        parse_column(row, "priority")?,
        optional_timestamp_column(row, "due_at")?,
        optional_user_column(row, "assignee_user_id")?,
        user_column(row, "created_by_user_id")?,
        user_column(row, "updated_by_user_id")?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
        u64::try_from(version).map_err(|_| DomainError::database("negative task version"))?,
    ))
}
