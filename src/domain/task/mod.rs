//! Task domain module.
//!
//! Tasks carry a three-state status (`OPEN`, `IN_PROGRESS`, `COMPLETED`)
//! and at most one assignee. The assignee decides which identity room
//! receives `task:update` pushes besides the Overseer's room.

mod aggregate;
mod errors;
mod status;

pub use aggregate::{PatchOutcome, Task, TaskPatch, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
pub use errors::TaskError;
pub use status::{TaskPriority, TaskStatus};
