//! Row decoding helpers shared by the PostgreSQL repositories.

use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Wraps a sqlx failure with the operation that hit it.
pub(super) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(format!("Failed to {}: {}", action, e))
}

/// Reads one column, naming it in the error.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &'static str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(format!("Failed to get {}: {}", name, e)))
}

pub(super) fn user_column(row: &PgRow, name: &'static str) -> Result<UserId, DomainError> {
    let raw: String = column(row, name)?;
    UserId::new(raw).map_err(|e| DomainError::database(format!("Invalid {}: {}", name, e)))
}

pub(super) fn optional_user_column(
    row: &PgRow,
    name: &'static str,
) -> Result<Option<UserId>, DomainError> {
    let raw: Option<String> = column(row, name)?;
    raw.map(|id| {
        UserId::new(id).map_err(|e| DomainError::database(format!("Invalid {}: {}", name, e)))
    })
    .transpose()
}

pub(super) fn timestamp_column(row: &PgRow, name: &'static str) -> Result<Timestamp, DomainError> {
    let dt: chrono::DateTime<chrono::Utc> = column(row, name)?;
    Ok(Timestamp::from_datetime(dt))
}

pub(super) fn optional_timestamp_column(
    row: &PgRow,
    name: &'static str,
) -> Result<Option<Timestamp>, DomainError> {
    let dt: Option<chrono::DateTime<chrono::Utc>> = column(row, name)?;
    Ok(dt.map(Timestamp::from_datetime))
}

/// Parses a stored enum value, reporting corrupt rows as database errors.
pub(super) fn parse_column<T>(row: &PgRow, name: &'static str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| DomainError::database(format!("Invalid {} '{}': {}", name, raw, e)))
}
