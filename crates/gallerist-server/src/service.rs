//! Gallery service: validation plus orchestration of the store and the media
//! host.
//!
//! Validation always runs before either collaborator is contacted. Store
//! connections are taken from the pool only around synchronous queries and
//! are never held across an `.await` on the media host.

use futures::future::{join_all, try_join_all};

use gallerist_core::images::{append_images, public_ids_for_deletion, remove_images};
use gallerist_core::{Error, GalleryId, HostedImage, Result};
use gallerist_db::models::Gallery;
use gallerist_db::pool::get_conn;
use gallerist_db::queries::galleries;
use gallerist_media::MediaHost;

use crate::context::AppContext;

const IMAGES_REQUIRED: &str = "At least one valid image URL is required";
const DELETIONS_REQUIRED: &str = "At least one image URL to delete is required";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A title must be present and not blank.
pub fn validate_title(title: Option<String>) -> Result<String> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(Error::invalid("Invalid title")),
    }
}

/// A list of image strings must be present, non-empty, and contain no blank
/// entries.
fn validate_list(list: Option<Vec<String>>, message: &str) -> Result<Vec<String>> {
    match list {
        Some(items) if !items.is_empty() && items.iter().all(|s| !s.trim().is_empty()) => Ok(items),
        _ => Err(Error::invalid(message)),
    }
}

/// Payloads to upload: remote URLs or inline `data:` URIs.
pub fn validate_payloads(images: Option<Vec<String>>) -> Result<Vec<String>> {
    validate_list(images, IMAGES_REQUIRED)
}

/// Hosted URLs selected for deletion.
pub fn validate_deletions(urls: Option<Vec<String>>) -> Result<Vec<String>> {
    validate_list(urls, DELETIONS_REQUIRED)
}

/// Parse a gallery id supplied by the caller.
pub fn parse_gallery_id(id: Option<&str>) -> Result<GalleryId> {
    id.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::invalid("Invalid gallery ID"))
}

// ---------------------------------------------------------------------------
// Media host fan-out
// ---------------------------------------------------------------------------

/// Upload every payload concurrently. Succeeds only if all uploads succeed;
/// the result keeps input order.
async fn upload_all(media: &dyn MediaHost, payloads: &[String]) -> Result<Vec<HostedImage>> {
    let uploads = payloads.iter().map(|payload| media.upload(payload));
    try_join_all(uploads).await.inspect_err(|e| {
        tracing::error!(error = %e, count = payloads.len(), "Image upload failed; aborting request");
    })
}

/// Best-effort concurrent delete of media host assets. Failures are logged.
async fn destroy_all(media: &dyn MediaHost, public_ids: &[String]) {
    let results = join_all(public_ids.iter().map(|id| media.destroy(id))).await;
    for (public_id, result) in public_ids.iter().zip(results) {
        if let Err(e) = result {
            tracing::warn!(public_id = %public_id, error = %e, "Media host deletion failed; continuing");
        }
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Upload `images` and create a gallery holding the hosted URLs in input
/// order. No record is written if any upload fails.
pub async fn create_gallery(
    ctx: &AppContext,
    title: Option<String>,
    images: Option<Vec<String>>,
) -> Result<Gallery> {
    let title = validate_title(title)?;
    let payloads = validate_payloads(images)?;

    let hosted = upload_all(ctx.media.as_ref(), &payloads).await?;

    let conn = get_conn(&ctx.db)?;
    let gallery = galleries::create_gallery(&conn, &title, &hosted)?;
    tracing::info!(gallery_id = %gallery.id, images = gallery.images.len(), "Gallery created");
    Ok(gallery)
}

/// All galleries in creation order.
pub fn list_galleries(ctx: &AppContext) -> Result<Vec<Gallery>> {
    let conn = get_conn(&ctx.db)?;
    galleries::list_galleries(&conn)
}

/// Fetch one gallery.
pub fn get_gallery(ctx: &AppContext, id: GalleryId) -> Result<Gallery> {
    let conn = get_conn(&ctx.db)?;
    galleries::get_gallery(&conn, id)?.ok_or_else(|| Error::not_found("gallery", id))
}

/// Upload `images` and append the hosted URLs after the gallery's existing
/// ones.
pub async fn append_images_to_gallery(
    ctx: &AppContext,
    id: GalleryId,
    images: Option<Vec<String>>,
) -> Result<Gallery> {
    let payloads = validate_payloads(images)?;

    // Fail before uploading anything if the gallery is missing.
    get_gallery(ctx, id)?;

    let hosted = upload_all(ctx.media.as_ref(), &payloads).await?;

    let mut conn = get_conn(&ctx.db)?;
    let gallery = galleries::modify_images(&mut conn, id, |current| append_images(current, hosted))?
        .ok_or_else(|| Error::not_found("gallery", id))?;
    tracing::info!(gallery_id = %id, added = payloads.len(), total = gallery.images.len(), "Images appended");
    Ok(gallery)
}

/// Remove every occurrence of the given URLs from a gallery and delete the
/// corresponding media host assets on a best-effort basis.
pub async fn remove_images_from_gallery(
    ctx: &AppContext,
    gallery_id: Option<&str>,
    to_delete: Option<Vec<String>>,
) -> Result<Gallery> {
    let id = parse_gallery_id(gallery_id)?;
    let to_delete = validate_deletions(to_delete)?;

    let existing = get_gallery(ctx, id)?;

    let public_ids = public_ids_for_deletion(&existing.images, &to_delete);
    destroy_all(ctx.media.as_ref(), &public_ids).await;

    let mut conn = get_conn(&ctx.db)?;
    let gallery = galleries::modify_images(&mut conn, id, |current| remove_images(current, &to_delete))?
        .ok_or_else(|| Error::not_found("gallery", id))?;
    tracing::info!(gallery_id = %id, remaining = gallery.images.len(), "Images removed");
    Ok(gallery)
}
