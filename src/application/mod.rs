//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers own the post-commit fan-out through [`RealtimeFanout`];
//! query handlers only read.

pub mod handlers;

pub use handlers::RealtimeFanout;
