//! HTTP DTOs for notification endpoints.

use serde::Deserialize;

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNotificationsParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Body of the mark-read call. Only `read: true` is meaningful; the body may
/// be omitted entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    #[serde(default = "default_read")]
    pub read: bool,
}

impl Default for MarkReadRequest {
    fn default() -> Self {
        Self { read: true }
    }
}

fn default_read() -> bool {
    true
}
