//! Overseer-only reporting handlers.

mod get_analytics;
mod list_agent_accounts;
mod list_agent_tasks;

pub use get_analytics::{GetAnalyticsHandler, GetAnalyticsQuery};
pub use list_agent_accounts::{ListAgentAccountsHandler, ListAgentAccountsQuery};
pub use list_agent_tasks::{ListAgentTasksHandler, ListAgentTasksQuery};
