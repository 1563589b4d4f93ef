//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, TaskId, UserId};
use crate::domain::notification::{Notification, NotificationDraft, NotificationType};
use crate::ports::NotificationRepository;

use super::columns::{column, db_error, optional_timestamp_column, timestamp_column, user_column};

/// PostgreSQL implementation of NotificationRepository.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn create(&self, draft: NotificationDraft) -> Result<Notification, DomainError> {
        let notification = Notification::from_draft(NotificationId::new(), draft);

        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, user_id, type, message, task_id, read_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id().as_uuid())
        .bind(notification.target().as_str())
        .bind(notification.kind().as_str())
        .bind(notification.message())
        .bind(notification.task_id().map(|id| *id.as_uuid()))
        .bind(notification.read_at().map(|t| *t.as_datetime()))
        .bind(notification.created_at().as_datetime())
        .bind(notification.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert notification"))?;

        Ok(notification)
    }

    async fn find_by_id(&self, id: &NotificationId) -> Result<Option<Notification>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, type, message, task_id, read_at, created_at, updated_at
            FROM notifications
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch notification"))?;

        row.as_ref().map(row_to_notification).transpose()
    }

    async fn find_by_target(
        &self,
        target: &UserId,
        limit: usize,
    ) -> Result<Vec<Notification>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, type, message, task_id, read_at, created_at, updated_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(target.as_str())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch notifications by user"))?;

        rows.iter().map(row_to_notification).collect()
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET
                message = $2,
                read_at = $3,
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(notification.id().as_uuid())
        .bind(notification.message())
        .bind(notification.read_at().map(|t| *t.as_datetime()))
        .bind(notification.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update notification"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id()),
            ));
        }
        Ok(())
    }

    async fn count_unread(&self) -> Result<u64, DomainError> {
        let unread: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE read_at IS NULL")
                .fetch_one(&self.pool)
                .await
                .map_err(db_error("count unread notifications"))?;

        u64::try_from(unread)
            .map_err(|_| DomainError::database(format!("Invalid unread count: {}", unread)))
    }
}

fn row_to_notification(row: &PgRow) -> Result<Notification, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let kind: String = column(row, "type")?;
    let kind = NotificationType::parse(&kind)
        .ok_or_else(|| DomainError::database(format!("Invalid notification type: {}", kind)))?;
    let task_id: Option<uuid::Uuid> = column(row, "task_id")?;

    Ok(Notification::reconstitute(
        NotificationId::from_uuid(id),
        user_column(row, "user_id")?,
        kind,
        column(row, "message")?,
        task_id.map(TaskId::from_uuid),
        optional_timestamp_column(row, "read_at")?,
        timestamp_column(row, "created_at")?,
        timestamp_column(row, "updated_at")?,
    ))
}
