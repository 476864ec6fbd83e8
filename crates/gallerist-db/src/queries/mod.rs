//! Database query modules.

pub mod galleries;
