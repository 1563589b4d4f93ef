//! Read-only view of registered users.
//!
//! Account management lives outside this crate; the realtime core only needs
//! to resolve who the Overseer is and which Field Agents exist.

mod summary;

pub use summary::UserSummary;
