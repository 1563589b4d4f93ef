//! Identity verification port.
//!
//! Every inbound credential, whether a REST `Authorization: Bearer` header or
//! the `token` presented when a realtime connection is opened, passes through
//! this port before anything else happens.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates a credential and extracts the identity and role it carries.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::MissingToken` for an empty credential
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
///   and for unknown roles
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Have no side effects beyond accepting or rejecting
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw credential (without any `Bearer ` prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::collections::HashMap;

    struct FixedTokens(HashMap<String, AuthenticatedUser>);

    #[async_trait]
    impl SessionValidator for FixedTokens {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            if token.is_empty() {
                return Err(AuthError::MissingToken);
            }
            self.0.get(token).cloned().ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn validator_is_usable_as_trait_object() {
        let user = AuthenticatedUser::new(UserId::new("agent-42").unwrap(), Role::FieldAgent);
        let validator: Box<dyn SessionValidator> = Box::new(FixedTokens(HashMap::from([(
            "good".to_string(),
            user.clone(),
        )])));

        assert_eq!(validator.validate("good").await.unwrap(), user);
        assert_eq!(validator.validate("bad").await, Err(AuthError::InvalidToken));
        assert_eq!(validator.validate("").await, Err(AuthError::MissingToken));
    }

    #[test]
    fn session_validator_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
