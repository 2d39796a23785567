mod data_stores;
mod email;
mod error;
mod invitation_code;
mod member;
mod member_id;
mod membership_request;
mod password;
mod permissions;
mod project;
mod project_id;
mod project_name;
mod role;
mod task;
mod user;
mod user_id;
mod user_name;
mod user_password_hash;

pub use data_stores::*;
pub use email::*;
pub use error::*;
pub use invitation_code::*;
pub use member::*;
pub use member_id::*;
pub use membership_request::*;
pub use password::*;
pub use permissions::*;
pub use project::*;
pub use project_id::*;
pub use project_name::*;
pub use role::*;
pub use task::*;
pub use user::*;
pub use user_id::*;
pub use user_name::*;
pub use user_password_hash::*;
