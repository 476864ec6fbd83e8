//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

use gallerist_core::{GalleryId, HostedImage};
use rusqlite::types::Type;
use uuid::Uuid;

/// Parse a UUID-based ID from a text column.
fn parse_id<T: From<Uuid>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    let uuid = Uuid::parse_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))?;
    Ok(T::from(uuid))
}

/// Parse a JSON-encoded column.
fn parse_json<T: serde::de::DeserializeOwned>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    serde_json::from_str(&s)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    pub id: GalleryId,
    pub title: String,
    /// Images in display order.
    pub images: Vec<HostedImage>,
    pub created_at: String,
    pub updated_at: String,
}

impl Gallery {
    pub const COLUMNS: &'static str = "id, title, images, created_at, updated_at";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: parse_id(row, 0)?,
            title: row.get(1)?,
            images: parse_json(row, 2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }

    /// Image URLs in display order.
    pub fn image_urls(&self) -> Vec<String> {
        gallerist_core::images::urls(&self.images)
    }
}
