//! Task command and query handlers.

mod create_task;
mod delete_task;
mod list_field_agents;
mod list_my_tasks;
mod list_tasks;
mod update_my_task_status;
mod update_task;

pub use create_task::{CreateTaskCommand, CreateTaskHandler, CreateTaskResult};
pub use delete_task::{DeleteTaskCommand, DeleteTaskHandler, DeleteTaskResult};
pub use list_field_agents::{ListFieldAgentsHandler, ListFieldAgentsQuery};
pub use list_my_tasks::{ListMyTasksHandler, ListMyTasksQuery};
pub use list_tasks::{ListTasksHandler, ListTasksQuery};
pub use update_my_task_status::{
    UpdateMyTaskStatusCommand, UpdateMyTaskStatusHandler, UpdateMyTaskStatusResult,
};
pub use update_task::{UpdateTaskCommand, UpdateTaskHandler, UpdateTaskResult};
