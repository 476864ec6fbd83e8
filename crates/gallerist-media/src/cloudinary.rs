//! Cloudinary upload API client.
//!
//! Uses signed `image/upload` and `image/destroy` calls. Every upload goes
//! through the configured upload preset so transformations and folder
//! placement are controlled on the Cloudinary side.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use gallerist_core::config::MediaConfig;
use gallerist_core::{Error, HostedImage, Result};

use crate::host::MediaHost;
use crate::signing::{sign, SIGNATURE_ALGORITHM};

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Credentials {
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

/// Signed client for the Cloudinary upload API.
///
/// Holds a shared [`reqwest::Client`] so connection pools are reused across
/// requests.
#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    http: Client,
    base_url: String,
    upload_preset: String,
    credentials: Option<Credentials>,
}

impl CloudinaryClient {
    /// Build a client from the media section of the config.
    ///
    /// Missing credentials are not an error here: the client is still
    /// constructed, and every call fails at the boundary instead.
    pub fn new(config: &MediaConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build media host HTTP client: {e}");
                Client::new()
            });

        let credentials = match (&config.cloud_name, &config.api_key, &config.api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(Credentials {
                cloud_name: cloud_name.clone(),
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
            }),
            _ => None,
        };

        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            upload_preset: config.upload_preset.clone(),
            credentials,
        }
    }

    fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    fn endpoint(&self, creds: &Credentials, action: &str) -> String {
        format!("{}/{}/image/{action}", self.base_url, creds.cloud_name)
    }

    /// Attach `timestamp`, `api_key`, and `signature` to `params`.
    fn signed(&self, creds: &Credentials, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.push(("timestamp", Utc::now().timestamp().to_string()));
        let signature = sign(&params, &creds.api_secret);
        params.push(("api_key", creds.api_key.clone()));
        params.push(("signature_algorithm", SIGNATURE_ALGORITHM.to_string()));
        params.push(("signature", signature));
        params
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, payload: &str) -> Result<HostedImage> {
        let creds = self
            .credentials()
            .ok_or_else(|| Error::Upload("media host credentials are not configured".into()))?;

        let params = self.signed(
            creds,
            vec![
                ("file", payload.to_string()),
                ("upload_preset", self.upload_preset.clone()),
            ],
        );

        let resp = self
            .http
            .post(self.endpoint(creds, "upload"))
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::Upload(format!("request to media host failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Upload(format!("failed to read media host response: {e}")))?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or_else(|| body.clone());
            tracing::warn!(status = %status, error = %message, "Media host rejected upload");
            return Err(Error::Upload(format!("media host returned {status}: {message}")));
        }

        let uploaded: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Upload(format!("unexpected media host response: {e}")))?;

        tracing::debug!(public_id = %uploaded.public_id, "Uploaded image to media host");

        Ok(HostedImage::new(uploaded.secure_url, uploaded.public_id))
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        let creds = self
            .credentials()
            .ok_or_else(|| Error::MediaHost("media host credentials are not configured".into()))?;

        let params = self.signed(creds, vec![("public_id", public_id.to_string())]);

        let resp = self
            .http
            .post(self.endpoint(creds, "destroy"))
            .form(&params)
            .send()
            .await
            .map_err(|e| Error::MediaHost(format!("request to media host failed: {e}")))?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = error_message(&body).unwrap_or(body);
            return Err(Error::MediaHost(format!("destroy returned {status}: {message}")));
        }

        let destroyed: DestroyResponse = serde_json::from_str(&body)
            .map_err(|e| Error::MediaHost(format!("unexpected media host response: {e}")))?;

        match destroyed.result.as_str() {
            "ok" => {
                tracing::debug!(public_id = %public_id, "Deleted image from media host");
                Ok(())
            }
            "not found" => {
                tracing::debug!(public_id = %public_id, "Media host had no such asset");
                Ok(())
            }
            other => Err(Error::MediaHost(format!("destroy of {public_id} returned '{other}'"))),
        }
    }
}

/// Pull `error.message` out of a Cloudinary error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error.message)
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}
