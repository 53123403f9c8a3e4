//! Persistence collaborator endpoints.
//!
//! The console talks to an opaque REST collaborator; each resource lives at
//! its own URL, configured through environment variables.

use std::env;

/// Collaborator endpoint configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `VIGIL_ROLES_URL`: roles endpoint (default: `http://127.0.0.1:8700/roles`)
/// - `VIGIL_AUTH_URL`: auth endpoint (default: `http://127.0.0.1:8700/auth`)
/// - `VIGIL_HTTP_TIMEOUT_SECONDS`: per-request timeout (default: `10`)
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Roles endpoint. `GET`/`POST` on the bare URL, `PUT`/`DELETE` with
    /// `?id=<id>`.
    pub roles_url: String,

    /// Auth endpoint. `POST` with login credentials.
    pub auth_url: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            roles_url: env::var("VIGIL_ROLES_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8700/roles".into()),
            auth_url: env::var("VIGIL_AUTH_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8700/auth".into()),
            timeout_seconds: env::var("VIGIL_HTTP_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            roles_url: "http://127.0.0.1:8700/roles".into(),
            auth_url: "http://127.0.0.1:8700/auth".into(),
            timeout_seconds: 10,
        }
    }
}
