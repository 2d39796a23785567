pub mod access;
pub mod auth;
pub mod constants;
pub mod tracing;
