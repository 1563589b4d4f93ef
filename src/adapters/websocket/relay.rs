//! Typing indicator relay.
//!
//! Stateless pass-through from a socket to the `Broadcaster`. The sender is
//! always the verified session's identity; nothing is persisted, throttled
//! or deduplicated. Clients expire the indicator on their own.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, UserId};
use crate::ports::{Broadcaster, DeliveryReport};

use super::messages::TypingRequest;

/// Forwards `chat:typing` pulses to the target identity's room.
#[derive(Clone)]
pub struct TypingRelay {
    broadcaster: Arc<dyn Broadcaster>,
}

impl TypingRelay {
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// Relay one pulse from `sender`.
    ///
    /// Returns `None` when the request was ignored (blank or malformed
    /// target) or the broadcast failed; failures are logged here.
    pub async fn relay(
        &self,
        sender: &AuthenticatedUser,
        request: TypingRequest,
    ) -> Option<DeliveryReport> {
        let target = request.to_user_id.trim();
        if target.is_empty() {
            return None;
        }
        let to = match UserId::new(target) {
            Ok(to) => to,
            Err(e) => {
                tracing::debug!(from = %sender.id, error = %e, "Ignoring typing signal");
                return None;
            }
        };

        match self.broadcaster.relay_typing(&sender.id, &to).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(from = %sender.id, to = %to, error = %e, "Typing relay failed");
                None
            }
        }
    }
}
