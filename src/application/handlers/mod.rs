//! Application handlers.
//!
//! Each mutating handler runs validate → persist → derive notifications →
//! broadcast the task → broadcast the notifications. Only the first two
//! steps can fail the call.

pub mod admin;
pub mod chat;
pub mod fanout;
pub mod notification;
pub mod task;

#[cfg(test)]
pub(crate) mod test_support;

pub use fanout::RealtimeFanout;
