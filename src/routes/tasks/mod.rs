mod delete_task;
mod get_tasks;
mod new_task;
mod update_task;

pub use delete_task::*;
pub use get_tasks::*;
pub use new_task::*;
pub use update_task::*;
