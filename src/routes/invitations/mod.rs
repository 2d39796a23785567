mod generate_code;
mod get_code;
mod join_project;

pub use generate_code::*;
pub use get_code::*;
pub use join_project::*;
