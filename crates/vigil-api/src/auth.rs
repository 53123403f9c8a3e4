//! Operator authentication against the auth collaborator.

use serde::Deserialize;
use tracing::instrument;
use vigil_models::users::{LoginRequest, SystemUser};

use crate::client::ApiClient;
use crate::error::ApiError;

/// Successful login response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub user: SystemUser,
}

impl ApiClient {
    /// Verifies credentials and returns the operator's identity.
    ///
    /// Credential hashing happens server-side; wrong credentials come back
    /// as [`ApiError::Unauthorized`] with the server's message.
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: &LoginRequest) -> Result<SystemUser, ApiError> {
        let response = self
            .http()
            .post(self.auth_url())
            .json(request)
            .send()
            .await?;

        let login: LoginResponse = Self::decode(response).await?;
        Ok(login.user)
    }
}
