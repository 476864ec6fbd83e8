//! Route handlers for the HTTP API.

pub mod galleries;
pub mod health;
