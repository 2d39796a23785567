mod approve_request;
mod list_requests;
mod reject_request;
mod submit_request;

pub use approve_request::*;
pub use list_requests::*;
pub use reject_request::*;
pub use submit_request::*;
