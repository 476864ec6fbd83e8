//! Application context shared by all route handlers.

use std::sync::Arc;

use gallerist_core::config::Config;
use gallerist_db::pool::DbPool;
use gallerist_media::MediaHost;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s and the pool
/// handle. There is no per-request mutable state in here: each request takes
/// its own connection from the pool and returns it on drop.
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Where image payloads are uploaded to and deleted from.
    pub media: Arc<dyn MediaHost>,
}

impl AppContext {
    pub fn new(db: DbPool, config: Config, media: Arc<dyn MediaHost>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            media,
        }
    }
}
