//! North Command - role-based task coordination backend.
//!
//! An Overseer assigns tasks to Field Agents; every committed change to a
//! task, notification or direct message is pushed to the affected sessions
//! over WebSocket rooms. REST stays the source of truth: realtime delivery is
//! best-effort and clients re-read state after reconnecting.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
