//! Realtime transport configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::{check_range, ValidationError};

/// Upper bound on a session's outbound queue.
pub const MAX_CHANNEL_CAPACITY: usize = 16_384;

const MAX_HEARTBEAT_SECS: u64 = 300;

/// Settings for the `/ws` session layer
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Frames buffered per session before new frames are dropped
    #[serde(default = "default_channel_capacity")]
    pub session_channel_capacity: usize,

    /// Interval between server pings
    #[serde(default = "default_heartbeat")]
    pub heartbeat_interval_secs: u64,
}

impl RealtimeConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range(
            "realtime.session_channel_capacity",
            self.session_channel_capacity as u64,
            1,
            MAX_CHANNEL_CAPACITY as u64,
        )?;
        check_range(
            "realtime.heartbeat_interval_secs",
            self.heartbeat_interval_secs,
            1,
            MAX_HEARTBEAT_SECS,
        )
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            session_channel_capacity: default_channel_capacity(),
            heartbeat_interval_secs: default_heartbeat(),
        }
    }
}

fn default_channel_capacity() -> usize {
    128
}

fn default_heartbeat() -> u64 {
    25
}
