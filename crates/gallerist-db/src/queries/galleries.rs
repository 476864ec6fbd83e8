//! Gallery CRUD operations.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use gallerist_core::{Error, GalleryId, HostedImage, Result};

use crate::models::Gallery;

fn images_json(images: &[HostedImage]) -> Result<String> {
    serde_json::to_string(images).map_err(|e| Error::Internal(e.to_string()))
}

/// Create a new gallery.
pub fn create_gallery(conn: &Connection, title: &str, images: &[HostedImage]) -> Result<Gallery> {
    let id = GalleryId::new();
    let now = Utc::now().to_rfc3339();
    let images_json = images_json(images)?;

    conn.execute(
        "INSERT INTO galleries (id, title, images, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        rusqlite::params![id.to_string(), title, images_json, now],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(Gallery {
        id,
        title: title.to_string(),
        images: images.to_vec(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Get a gallery by ID.
pub fn get_gallery(conn: &Connection, id: GalleryId) -> Result<Option<Gallery>> {
    let q = format!("SELECT {} FROM galleries WHERE id = ?1", Gallery::COLUMNS);
    conn.query_row(&q, [id.to_string()], Gallery::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List all galleries in creation order.
pub fn list_galleries(conn: &Connection) -> Result<Vec<Gallery>> {
    let q = format!("SELECT {} FROM galleries ORDER BY seq", Gallery::COLUMNS);
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], Gallery::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Replace a gallery's image list. Returns `false` if no such gallery exists.
pub fn update_images(conn: &Connection, id: GalleryId, images: &[HostedImage]) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE galleries SET images = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![images_json(images)?, Utc::now().to_rfc3339(), id.to_string()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Read a gallery's image list, transform it, and write it back atomically.
///
/// Runs under `BEGIN IMMEDIATE` so two concurrent edits of one gallery
/// serialize instead of overwriting each other. Returns `None` (and writes
/// nothing) if the gallery does not exist.
pub fn modify_images<F>(conn: &mut Connection, id: GalleryId, f: F) -> Result<Option<Gallery>>
where
    F: FnOnce(&[HostedImage]) -> Vec<HostedImage>,
{
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| Error::database(e.to_string()))?;

    let Some(current) = get_gallery(&tx, id)? else {
        return Ok(None);
    };

    update_images(&tx, id, &f(&current.images))?;
    let updated = get_gallery(&tx, id)?;

    tx.commit().map_err(|e| Error::database(e.to_string()))?;

    Ok(updated)
}
