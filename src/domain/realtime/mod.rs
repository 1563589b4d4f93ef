//! Realtime routing model.
//!
//! Sessions join rooms derived from their identity and role; domain events
//! resolve to a list of `(room, payload)` emissions. Both rules are pure and
//! live here so that the WebSocket adapter only has to deliver.

mod events;
mod rooms;

pub use events::{
    ChatDelivery, DomainEvent, Emission, NotificationNew, RealtimeEvent, TaskSnapshot, TaskUpdate,
    TypingPulse,
};
pub use rooms::{RoomKey, PRIVILEGED_ROOM};
