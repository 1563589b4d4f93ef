//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Session token verification (JWT, mock)
//! - `http` - REST endpoints, auth middleware and the top-level router
//! - `memory` - In-memory stores for tests and local runs
//! - `postgres` - sqlx-backed stores
//! - `websocket` - Room registry, broadcaster and the `/ws` session loop

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;
