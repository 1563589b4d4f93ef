//! PostgreSQL implementation of ChatMessageRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::chat::ChatMessage;
use crate::domain::foundation::{DomainError, MessageId, UserId};
use crate::ports::ChatMessageRepository;

use super::columns::{column, db_error, timestamp_column, user_column};

/// PostgreSQL implementation of ChatMessageRepository.
#[derive(Clone)]
pub struct PostgresChatMessageRepository {
    pool: PgPool,
}

impl PostgresChatMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PostgresChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO chat_messages (id, from_user_id, to_user_id, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.from().as_str())
        .bind(message.to().as_str())
        .bind(message.message())
        .bind(message.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert chat message"))?;

        Ok(())
    }

    async fn find_conversation(
        &self,
        a: &UserId,
        b: &UserId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, from_user_id, to_user_id, message, created_at
            FROM chat_messages
            WHERE (from_user_id = $1 AND to_user_id = $2)
               OR (from_user_id = $2 AND to_user_id = $1)
            ORDER BY created_at ASC
            LIMIT $3
            "#,
        )
        .bind(a.as_str())
        .bind(b.as_str())
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch conversation"))?;

        rows.iter().map(row_to_message).collect()
    }
}

fn row_to_message(row: &PgRow) -> Result<ChatMessage, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    Ok(ChatMessage::reconstitute(
        MessageId::from_uuid(id),
        user_column(row, "from_user_id")?,
        user_column(row, "to_user_id")?,
        column(row, "message")?,
        timestamp_column(row, "created_at")?,
    ))
}
