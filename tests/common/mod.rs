//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, default config, a
//! [`FakeMediaHost`], and a full [`AppContext`]. The [`TestHarness::with_server`]
//! constructor starts Axum on a random port for HTTP-level testing, while
//! [`TestHarness::request`] drives the router in-process.

#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use tower::ServiceExt;

use gallerist_core::config::Config;
use gallerist_core::{Error, HostedImage, Result};
use gallerist_db::pool::{init_memory_pool, DbPool};
use gallerist_media::MediaHost;
use gallerist_server::context::AppContext;
use gallerist_server::router::build_router;

// ---------------------------------------------------------------------------
// FakeMediaHost
// ---------------------------------------------------------------------------

/// In-process media host. Each upload gets a sequential public id and a URL
/// derived from it; payloads listed in `fail_uploads` are rejected.
#[derive(Default)]
pub struct FakeMediaHost {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    next: usize,
    uploads: Vec<String>,
    destroyed: Vec<String>,
    fail_uploads: HashSet<String>,
    fail_destroys: bool,
}

impl FakeMediaHost {
    pub fn fail_upload_of(&self, payload: &str) {
        self.state.lock().fail_uploads.insert(payload.to_string());
    }

    pub fn fail_all_destroys(&self) {
        self.state.lock().fail_destroys = true;
    }

    /// Payloads accepted so far, in completion order.
    pub fn uploads(&self) -> Vec<String> {
        self.state.lock().uploads.clone()
    }

    /// Public ids passed to `destroy`, in call order.
    pub fn destroyed(&self) -> Vec<String> {
        self.state.lock().destroyed.clone()
    }
}

#[async_trait]
impl MediaHost for FakeMediaHost {
    async fn upload(&self, payload: &str) -> Result<HostedImage> {
        // Let concurrent requests interleave the way real network calls do.
        tokio::task::yield_now().await;

        let mut state = self.state.lock();
        if state.fail_uploads.contains(payload) {
            return Err(Error::Upload(format!("rejected {payload}")));
        }
        state.next += 1;
        let public_id = format!("gallery/img{}", state.next);
        state.uploads.push(payload.to_string());
        Ok(HostedImage::new(
            format!("https://media.test/image/upload/v1/{public_id}.jpg"),
            public_id,
        ))
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.destroyed.push(public_id.to_string());
        if state.fail_destroys {
            return Err(Error::MediaHost(format!("cannot destroy {public_id}")));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TestHarness
// ---------------------------------------------------------------------------

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database and a [`FakeMediaHost`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    pub media: Arc<FakeMediaHost>,
    pub app: Router,
}

impl TestHarness {
    /// Create a new harness with default configuration and in-memory DB.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration and in-memory DB.
    pub fn with_config(config: Config) -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let media = Arc::new(FakeMediaHost::default());
        let ctx = AppContext::new(db.clone(), config, media.clone());
        let app = build_router(ctx.clone(), None);
        Self { ctx, db, media, app }
    }

    /// Create a harness whose router also serves the client UI from `dir`.
    pub fn with_static_dir(dir: &Path) -> Self {
        let mut harness = Self::new();
        harness.app = build_router(harness.ctx.clone(), Some(dir.to_path_buf()));
        harness
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = harness.app.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> gallerist_db::pool::PooledConnection {
        gallerist_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    /// Number of gallery rows in the store.
    pub fn gallery_count(&self) -> usize {
        gallerist_db::queries::galleries::list_galleries(&self.conn())
            .expect("list galleries")
            .len()
    }

    /// Send a request through the router in-process and decode the JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        self.request_with_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        headers: &[(&str, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.app.clone().oneshot(request).await.expect("router call");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    /// Create a gallery through the API and return its `data` object.
    pub async fn create_gallery(&self, title: &str, images: &[&str]) -> serde_json::Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/galleries",
                Some(serde_json::json!({ "title": title, "images": images })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
        body["data"].clone()
    }
}

/// Collect the `images` array of a gallery JSON object as strings.
pub fn image_urls(gallery: &serde_json::Value) -> Vec<String> {
    gallery["images"]
        .as_array()
        .expect("images array")
        .iter()
        .map(|v| v.as_str().expect("url string").to_string())
        .collect()
}
