//! API-key authentication for the API and the web pages.

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::Settings;
use crate::ui::DEFAULT_SESSION_MAX_AGE;

/// Security settings for the HTTP layer.
#[derive(Clone, Debug)]
pub struct SecurityConfig {
    /// Bearer token required on every route except `/health`; `None`
    /// disables the check.
    pub api_key: Option<String>,
    /// Allowed CORS origins; `None` allows any origin.
    pub cors_origins: Option<Vec<String>>,
    /// Idle lifetime of a web UI session.
    pub session_max_age: Duration,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cors_origins: None,
            session_max_age: DEFAULT_SESSION_MAX_AGE,
        }
    }
}

impl SecurityConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            cors_origins: settings.cors_origins.clone(),
            session_max_age: settings.session_max_age,
        }
    }

    /// No authentication (local use and tests).
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
            ..Self::default()
        }
    }
}

/// Rejects requests without `Authorization: Bearer <api_key>` when a key is
/// configured.
pub async fn auth_middleware(
    State(config): State<SecurityConfig>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected_key = match &config.api_key {
        Some(key) => key,
        None => return Ok(next.run(request).await),
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == expected_key => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key provided");
            Err(StatusCode::UNAUTHORIZED)
        }
        None if auth_header.is_some() => {
            tracing::warn!("Invalid Authorization header format");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
