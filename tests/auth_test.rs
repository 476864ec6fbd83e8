//! Admin auth integration tests.
//!
//! With auth enabled, every mutating `/api` route requires the configured
//! bearer token while reads stay public.

mod common;

use axum::http::{Method, StatusCode};
use common::TestHarness;
use gallerist_core::config::{AuthConfig, Config};
use serde_json::json;

const KEY: &str = "s3cret";

fn secured() -> TestHarness {
    let config = Config {
        auth: AuthConfig {
            enabled: true,
            api_key: Some(KEY.into()),
        },
        ..Config::default()
    };
    TestHarness::with_config(config)
}

#[tokio::test]
async fn writes_without_token_are_401() {
    let h = secured();

    let (status, body) = h
        .request(
            Method::POST,
            "/api/galleries",
            Some(json!({ "title": "T", "images": ["a"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = h
        .request(
            Method::PATCH,
            "/api/galleries",
            Some(json!({ "galleryId": "x", "imagesToDelete": ["u"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(h.media.uploads().is_empty());
    assert_eq!(h.gallery_count(), 0);
}

#[tokio::test]
async fn wrong_token_is_401() {
    let h = secured();
    let (status, _) = h
        .request_with_headers(
            Method::POST,
            "/api/galleries",
            Some(json!({ "title": "T", "images": ["a"] })),
            &[("authorization", "Bearer wrong")],
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_token_allows_writes() {
    let h = secured();
    let auth = format!("Bearer {KEY}");

    let (status, body) = h
        .request_with_headers(
            Method::POST,
            "/api/galleries",
            Some(json!({ "title": "T", "images": ["a"] })),
            &[("authorization", auth.as_str())],
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = h
        .request_with_headers(
            Method::PATCH,
            &format!("/api/galleries/{id}/images"),
            Some(json!({ "images": ["b"] })),
            &[("authorization", auth.as_str())],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reads_stay_public() {
    let h = secured();

    let (status, body) = h.request(Method::GET, "/api/galleries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, _) = h.request(Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
