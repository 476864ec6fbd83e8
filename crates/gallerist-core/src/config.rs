//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server, auth, and media host sections. Every section defaults sensibly so
//! a completely empty `{}` file is valid. Media host credentials are usually
//! supplied through the environment; see [`Config::apply_env`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

/// Environment variable holding the media host cloud name.
pub const ENV_CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
/// Environment variable holding the media host API key.
pub const ENV_API_KEY: &str = "CLOUDINARY_API_KEY";
/// Environment variable holding the media host API secret.
pub const ENV_API_SECRET: &str = "CLOUDINARY_API_SECRET";
/// Environment variable overriding the upload preset name.
pub const ENV_UPLOAD_PRESET: &str = "CLOUDINARY_UPLOAD_PRESET";
/// Environment variable holding the admin API key. Setting it enables auth.
pub const ENV_ADMIN_KEY: &str = "GALLERIST_API_KEY";

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::InvalidArgument(format!("config parse error: {e}")))
    }

    /// Load configuration from `path`, or defaults when no path is given.
    ///
    /// A path that was given must exist and parse; falling back to defaults
    /// there would silently drop settings such as `auth.enabled`.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Load a config file strictly: a missing or unparsable file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_CLOUD_NAME) {
            self.media.cloud_name = Some(v);
        }
        if let Some(v) = get(ENV_API_KEY) {
            self.media.api_key = Some(v);
        }
        if let Some(v) = get(ENV_API_SECRET) {
            self.media.api_secret = Some(v);
        }
        if let Some(v) = get(ENV_UPLOAD_PRESET) {
            self.media.upload_preset = v;
        }
        if let Some(v) = get(ENV_ADMIN_KEY) {
            self.auth.enabled = true;
            self.auth.api_key = Some(v);
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.server.max_body_bytes < 2 * 1024 * 1024 {
            warnings.push(format!(
                "server.max_body_bytes is {}; inline image uploads will likely be rejected",
                self.server.max_body_bytes
            ));
        }

        if self.auth.enabled && self.auth.api_key.is_none() {
            warnings.push("auth is enabled but no api_key is set; every write will be rejected".into());
        }

        if !self.media.has_credentials() {
            warnings.push(
                "media cloud_name, api_key, or api_secret is missing; every upload will fail".into(),
            );
        }

        if self.media.upload_preset.trim().is_empty() {
            warnings.push("media.upload_preset is empty".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub db_path: PathBuf,
    /// Largest accepted `/api` request body, in bytes.
    pub max_body_bytes: usize,
}

/// Default request body limit (50 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            static_dir: None,
            db_path: PathBuf::from("./data/gallerist.db"),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Admin authentication for mutating routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
}

/// Media host (Cloudinary) credentials and upload settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub upload_preset: String,
    pub api_base_url: String,
    pub timeout_secs: u64,
}

impl MediaConfig {
    /// Whether all three credentials are present.
    pub fn has_credentials(&self) -> bool {
        self.cloud_name.is_some() && self.api_key.is_some() && self.api_secret.is_some()
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            upload_preset: "gallery".into(),
            api_base_url: "https://api.cloudinary.com/v1_1".into(),
            timeout_secs: 30,
        }
    }
}
