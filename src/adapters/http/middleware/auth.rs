//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication
//! - `AuthRejection` - The 401/403/503 response shared by REST and the realtime handshake
//!
//! # Architecture
//!
//! The middleware only talks to the `SessionValidator` port, so the JWT
//! verifier and the test mock are interchangeable.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

use crate::adapters::http::error::ErrorResponse;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Authentication middleware that validates Bearer tokens.
///
/// A request without an `Authorization: Bearer <token>` header passes
/// through untouched; routes that need an identity use [`RequireAuth`].
/// A header that is present but fails verification is refused with 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => AuthRejection::from(e).into_response(),
    }
}

/// Extractor that requires authentication.
///
/// Fails with 401 when `auth_middleware` did not inject a user.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No credential reached the handler.
    Unauthenticated,
    /// A credential was presented and refused.
    Auth(AuthError),
}

impl From<AuthError> for AuthRejection {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken => AuthRejection::Unauthenticated,
            other => AuthRejection::Auth(other),
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthorized("Authentication required"),
            ),
            AuthRejection::Auth(AuthError::TokenExpired) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthorized("Token expired"),
            ),
            AuthRejection::Auth(AuthError::InsufficientPermissions) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::forbidden("Insufficient permissions"),
            ),
            AuthRejection::Auth(AuthError::ServiceUnavailable(msg)) => {
                tracing::error!(error = %msg, "Auth service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(
                        "SERVICE_UNAVAILABLE",
                        "Authentication service unavailable",
                    ),
                )
            }
            AuthRejection::Auth(_) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::unauthorized("Invalid token"),
            ),
        };

        (status, Json(body)).into_response()
    }
}
