//! Shared wiring for integration tests: the real application over in-memory
//! stores, with fixed bearer tokens for the demo accounts.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use north_command::adapters::auth::MockSessionValidator;
use north_command::adapters::memory::InMemoryUserDirectory;
use north_command::adapters::websocket::{Frame, SessionRegistration};
use north_command::app::{demo_users, Application, Stores};
use north_command::config::{RealtimeConfig, ServerConfig};
use north_command::domain::foundation::{AuthenticatedUser, Role, UserId};

pub const SANTA: &str = "santa";
pub const ELF1: &str = "elf01";
pub const ELF2: &str = "elf02";

/// Bearer token accepted for `user_id` by the mock validator.
pub fn token_for(user_id: &str) -> String {
    format!("token-{}", user_id)
}

pub fn identity(user_id: &str) -> AuthenticatedUser {
    let role = if user_id == SANTA {
        Role::Overseer
    } else {
        Role::FieldAgent
    };
    AuthenticatedUser::new(UserId::new(user_id).unwrap(), role)
}

pub fn build_app() -> Application {
    let users = demo_users().unwrap();
    let validator = users.iter().fold(MockSessionValidator::new(), |v, user| {
        v.with_role(token_for(user.id.as_str()), user.id.clone(), user.role)
    });
    Application::build(
        Stores::in_memory(InMemoryUserDirectory::with_users(users)),
        Arc::new(validator),
        &ServerConfig::default(),
        &RealtimeConfig::default(),
    )
}

/// Open a realtime session for `user_id` directly on the registry.
pub async fn connect(app: &Application, user_id: &str) -> SessionRegistration {
    app.registry.join(&identity(user_id)).await
}

/// Every frame queued for a session, decoded.
pub fn drain(rx: &mut mpsc::Receiver<Frame>) -> Vec<Value> {
    let mut frames = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        frames.push(serde_json::from_str(&frame).unwrap());
    }
    frames
}

pub fn events(frames: &[Value]) -> Vec<&str> {
    frames.iter().map(|f| f["event"].as_str().unwrap()).collect()
}

/// Send one request through the router; returns status and JSON body
/// (`Value::Null` for empty bodies).
pub async fn call(
    app: &Application,
    method: Method,
    uri: &str,
    as_user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = as_user {
        builder = builder.header("Authorization", format!("Bearer {}", token_for(user)));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
