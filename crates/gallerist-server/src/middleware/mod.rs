//! HTTP middleware: request ID and admin authentication.

pub mod auth;
pub mod request_id;
