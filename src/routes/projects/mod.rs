mod delete_project;
mod get_members;
mod get_project;
mod get_project_list;
mod leave_project;
mod new_project;
mod remove_member;
mod update_member_role;
mod update_project;

pub use delete_project::*;
pub use get_members::*;
pub use get_project::*;
pub use get_project_list::*;
pub use leave_project::*;
pub use new_project::*;
pub use remove_member::*;
pub use update_member_role::*;
pub use update_project::*;
