//! Room keys and the membership rule.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::domain::foundation::{Role, UserId};

/// Name of the single room joined by privileged sessions.
pub const PRIVILEGED_ROOM: &str = "overseer";

/// A logical broadcast target.
///
/// Rooms are never stored; they are derived from an identity or a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoomKey {
    /// One per identity, shared by all of that identity's sessions.
    Identity(UserId),
    /// Joined only by sessions with a privileged role.
    Privileged,
}

impl RoomKey {
    pub fn identity(user: &UserId) -> Self {
        RoomKey::Identity(user.clone())
    }

    /// Rooms a freshly verified session joins. Membership depends on nothing
    /// but `(user, role)` and does not change until disconnect.
    pub fn memberships(user: &UserId, role: Role) -> Vec<RoomKey> {
        let mut rooms = vec![RoomKey::identity(user)];
        if role.is_privileged() {
            rooms.push(RoomKey::Privileged);
        }
        rooms
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomKey::Identity(user) => write!(f, "user:{}", user),
            RoomKey::Privileged => f.write_str(PRIVILEGED_ROOM),
        }
    }
}

impl Serialize for RoomKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
