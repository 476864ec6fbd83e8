//! The media host abstraction.

use async_trait::async_trait;
use gallerist_core::{HostedImage, Result};

/// A third-party service that stores image bytes and serves them publicly.
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload a payload (a remote URL or an inline `data:` URI) and return
    /// the hosted URL together with the host's public id.
    ///
    /// Failures are reported as [`gallerist_core::Error::Upload`].
    async fn upload(&self, payload: &str) -> Result<HostedImage>;

    /// Delete the asset identified by `public_id`.
    async fn destroy(&self, public_id: &str) -> Result<()>;
}
