//! Admin authentication middleware.
//!
//! Reads (`GET`, `HEAD`, `OPTIONS`) are always public. When auth is enabled
//! in config, every other method must carry `Authorization: Bearer <api_key>`
//! matching the configured admin key.

use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use gallerist_core::config::AuthConfig;

use crate::context::AppContext;
use crate::error::AppError;

/// Whether `method` only reads state.
fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Check an `Authorization` header value against the auth config.
pub fn is_authorized(auth: &AuthConfig, authorization: Option<&str>) -> bool {
    if !auth.enabled {
        return true;
    }

    let Some(expected) = auth.api_key.as_deref() else {
        return false;
    };

    authorization
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.trim() == expected)
        .unwrap_or(false)
}

/// Authentication middleware applied to the `/api` router.
pub async fn admin_middleware(
    State(ctx): State<AppContext>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    if is_read_only(request.method()) {
        return next.run(request).await;
    }

    let authorization = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if is_authorized(&ctx.config.auth, authorization) {
        next.run(request).await
    } else {
        tracing::debug!(method = %request.method(), path = %request.uri().path(), "Rejected unauthenticated write");
        AppError::new(gallerist_core::Error::Unauthorized(
            "admin bearer token required".into(),
        ))
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(key: Option<&str>) -> AuthConfig {
        AuthConfig {
            enabled: true,
            api_key: key.map(String::from),
        }
    }

    #[test]
    fn disabled_allows_everything() {
        assert!(is_authorized(&AuthConfig::default(), None));
    }

    #[test]
    fn bearer_must_match() {
        let auth = enabled(Some("secret"));
        assert!(is_authorized(&auth, Some("Bearer secret")));
        assert!(!is_authorized(&auth, Some("Bearer nope")));
        assert!(!is_authorized(&auth, Some("secret")));
        assert!(!is_authorized(&auth, None));
    }

    #[test]
    fn enabled_without_key_rejects() {
        assert!(!is_authorized(&enabled(None), Some("Bearer anything")));
    }

    #[test]
    fn read_methods_are_public() {
        assert!(is_read_only(&Method::GET));
        assert!(!is_read_only(&Method::PATCH));
        assert!(!is_read_only(&Method::POST));
    }
}
