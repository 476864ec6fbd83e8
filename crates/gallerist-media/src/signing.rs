//! Request signing for the Cloudinary upload API.
//!
//! Signed parameters are sorted by name, joined as `key=value&key=value`,
//! suffixed with the API secret, and hashed. `file`, `api_key`,
//! `cloud_name`, `resource_type`, and `signature_algorithm` never take part.

use sha2::{Digest, Sha256};

/// Name sent as `signature_algorithm` alongside every signed request.
pub const SIGNATURE_ALGORITHM: &str = "sha256";

const UNSIGNED: &[&str] = &[
    "file",
    "api_key",
    "cloud_name",
    "resource_type",
    "signature_algorithm",
];

/// Build the canonical string that gets hashed (without the secret).
pub fn string_to_sign(params: &[(&str, String)]) -> String {
    let mut signed: Vec<&(&str, String)> = params
        .iter()
        .filter(|(k, v)| !UNSIGNED.contains(k) && !v.is_empty())
        .collect();
    signed.sort_by(|a, b| a.0.cmp(b.0));
    signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Hex-encoded SHA-256 signature of `params` under `api_secret`.
pub fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(string_to_sign(params).as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
