//! Image-list operations applied to a gallery before it is persisted.
//!
//! A gallery stores each image as the public URL the media host returned
//! together with the host's public id, so deletes never have to guess the id
//! back out of the URL. [`public_id_from_url`] is kept for URLs that were not
//! recorded that way.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// An image stored on the media host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedImage {
    /// Publicly addressable URL returned at upload time.
    pub url: String,
    /// Media host identifier used for deletion.
    pub public_id: String,
}

impl HostedImage {
    pub fn new(url: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_id: public_id.into(),
        }
    }
}

/// Append `new` after every existing image, keeping both orders and not
/// deduplicating.
pub fn append_images(existing: &[HostedImage], new: Vec<HostedImage>) -> Vec<HostedImage> {
    let mut images = Vec::with_capacity(existing.len() + new.len());
    images.extend_from_slice(existing);
    images.extend(new);
    images
}

/// Drop every occurrence of each URL in `to_delete`, preserving the order of
/// what remains.
pub fn remove_images(existing: &[HostedImage], to_delete: &[String]) -> Vec<HostedImage> {
    let targets: HashSet<&str> = to_delete.iter().map(String::as_str).collect();
    existing
        .iter()
        .filter(|img| !targets.contains(img.url.as_str()))
        .cloned()
        .collect()
}

/// Resolve the media host public id for each URL in `to_delete`.
///
/// The id recorded at upload wins; otherwise it is derived from the URL.
/// URLs with neither are skipped. Duplicate URLs resolve once.
pub fn public_ids_for_deletion(existing: &[HostedImage], to_delete: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for url in to_delete {
        if !seen.insert(url.as_str()) {
            continue;
        }
        let recorded = existing
            .iter()
            .find(|img| img.url == *url && !img.public_id.is_empty())
            .map(|img| img.public_id.clone());
        match recorded.or_else(|| public_id_from_url(url)) {
            Some(id) => ids.push(id),
            None => tracing::debug!(url = %url, "No public id derivable; skipping media delete"),
        }
    }
    ids
}

/// Derive a public id from a hosted URL: the last path segment with its file
/// extension stripped.
///
/// ```
/// use gallerist_core::images::public_id_from_url;
///
/// let url = "https://res.cloudinary.com/demo/image/upload/v1712/abc123.jpg";
/// assert_eq!(public_id_from_url(url).as_deref(), Some("abc123"));
/// ```
pub fn public_id_from_url(url: &str) -> Option<String> {
    let last = url.rsplit('/').next()?;
    let stem = last.split('.').next()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Project a stored image list onto the URL list exposed to clients.
pub fn urls(images: &[HostedImage]) -> Vec<String> {
    images.iter().map(|img| img.url.clone()).collect()
}
