//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`gallerist_core::Error`] so that route
//! handlers can return `Result<T, AppError>` directly. Client errors carry
//! their own message; server errors are logged here and reported with a
//! generic message plus the underlying error text.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Message returned for every 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred while processing the request";

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: gallerist_core::Error,
}

impl AppError {
    pub fn new(inner: gallerist_core::Error) -> Self {
        Self { inner }
    }

    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.inner.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<gallerist_core::Error> for AppError {
    fn from(e: gallerist_core::Error) -> Self {
        Self::new(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        use gallerist_core::Error;

        // Only the body limit yields 413; every other rejection is the
        // caller's malformed input.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::new(Error::PayloadTooLarge(rejection.body_text()));
        }
        Self::new(Error::InvalidArgument(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use gallerist_core::Error;

        let status = self.status();

        let code = match &self.inner {
            Error::InvalidArgument(_) => "invalid_argument",
            Error::NotFound { .. } => "not_found",
            Error::Unauthorized(_) => "unauthorized",
            Error::PayloadTooLarge(_) => "payload_too_large",
            Error::Upload(_) => "upload_failure",
            Error::MediaHost(_) => "media_host_error",
            Error::Database { .. } => "store_failure",
            Error::Io { .. } => "io_error",
            Error::Internal(_) => "internal_error",
        };

        let body = match &self.inner {
            Error::InvalidArgument(message) => json!({ "message": message, "code": code }),
            Error::NotFound { entity, .. } => json!({
                "message": format!("{} not found", capitalize(entity)),
                "code": code,
            }),
            Error::Unauthorized(_) => json!({ "message": "Authentication required", "code": code }),
            Error::PayloadTooLarge(_) => json!({ "message": "Request body too large", "code": code }),
            other => {
                tracing::error!(
                    status = %status,
                    error = %other,
                    "Server error in API handler"
                );
                json!({
                    "message": SERVER_ERROR_MESSAGE,
                    "error": other.to_string(),
                    "code": code,
                })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
