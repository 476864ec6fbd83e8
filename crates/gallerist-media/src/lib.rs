//! gallerist-media: the media host collaborator.
//!
//! [`MediaHost`] is the seam the gallery service talks to; [`CloudinaryClient`]
//! is the production implementation.

pub mod cloudinary;
pub mod host;
pub mod signing;

pub use cloudinary::CloudinaryClient;
pub use host::MediaHost;
