mod delete_user;
mod login;
mod logout;
mod signup;
mod verify_token;

pub use delete_user::*;
pub use login::*;
pub use logout::*;
pub use signup::*;
pub use verify_token::*;
