//! gallerist-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for the other gallerist crates,
//! providing the gallery identifier, a unified error type, application
//! configuration, and the pure image-list operations the gallery service
//! applies before persisting.

pub mod config;
pub mod error;
pub mod ids;
pub mod images;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::GalleryId;
pub use images::HostedImage;
