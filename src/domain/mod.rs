//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, roles, errors)
//! - `task` - Task aggregate, status and patch rules
//! - `notification` - Notifications derived from task mutations
//! - `chat` - Direct messages between two identities
//! - `user` - Read-only user projections
//! - `realtime` - Rooms, domain events and fan-out routing
//! - `admin` - Overseer dashboard figures

pub mod admin;
pub mod chat;
pub mod foundation;
pub mod notification;
pub mod realtime;
pub mod task;
pub mod user;
