//! Overseer-only reporting over tasks, accounts and notifications.

mod errors;
mod report;

pub use errors::AdminError;
pub use report::{AgentWorkload, AnalyticsReport, StatusTotals};
