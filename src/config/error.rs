//! Configuration error types

use thiserror::Error;

/// Failure to produce a usable [`AppConfig`](super::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    Invalid(#[from] ValidationError),
}

/// A loaded value that the server refuses to start with.
///
/// Keys are reported in dotted form (`database.url`), matching the
/// `NORTH_COMMAND__DATABASE__URL` variable that sets them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be between {min} and {max}, got {actual}")]
    OutOfRange {
        key: &'static str,
        min: u64,
        max: u64,
        actual: u64,
    },

    #[error("server.listen is not a socket address: {0:?}")]
    ListenAddress(String),

    #[error("database.url must use the postgres:// or postgresql:// scheme")]
    DatabaseScheme,

    #[error("auth.jwt_secret must be at least {min} bytes in production, got {actual}")]
    WeakSecret { min: usize, actual: usize },
}

/// Reject `actual` outside `min..=max`.
pub(super) fn check_range(
    key: &'static str,
    actual: u64,
    min: u64,
    max: u64,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&actual) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            key,
            min,
            max,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(check_range("realtime.heartbeat_interval_secs", 1, 1, 300).is_ok());
        assert!(check_range("realtime.heartbeat_interval_secs", 300, 1, 300).is_ok());
        assert_eq!(
            check_range("realtime.heartbeat_interval_secs", 301, 1, 300),
            Err(ValidationError::OutOfRange {
                key: "realtime.heartbeat_interval_secs",
                min: 1,
                max: 300,
                actual: 301,
            })
        );
    }

    #[test]
    fn messages_name_the_offending_key() {
        let err = check_range("server.request_timeout_secs", 0, 1, 300).unwrap_err();
        assert_eq!(
            err.to_string(),
            "server.request_timeout_secs must be between 1 and 300, got 0"
        );
        assert_eq!(
            ValidationError::Missing("database.url").to_string(),
            "database.url must be set"
        );
    }
}
