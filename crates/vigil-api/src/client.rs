//! Shared HTTP client for the persistence collaborator.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use vigil_config::ApiConfig;

use crate::error::ApiError;

/// Error body the collaborator sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the persistence collaborator.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client for the configured collaborator endpoints.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { http, config })
    }

    /// Creates a client configured from environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ApiConfig::from_env())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn roles_url(&self) -> &str {
        &self.config.roles_url
    }

    pub(crate) fn auth_url(&self) -> &str {
        &self.config.auth_url
    }

    /// Decodes a collaborator response, converting non-2xx statuses into
    /// the [`ApiError`] taxonomy with the server's own error message.
    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized { message }),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound { message }),
            _ => Err(ApiError::Status {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
