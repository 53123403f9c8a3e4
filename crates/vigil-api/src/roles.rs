//! Role operations against the persistence collaborator.
//!
//! The wire contract: `GET` on the bare roles URL lists all roles, `GET`
//! with `?id=` fetches one, `POST` creates, `PUT` with `?id=` replaces name,
//! description, and the full permission tree wholesale, `DELETE` with `?id=`
//! removes a role (refused server-side while users are assigned to it).

use chrono::{DateTime, Utc};
use tracing::instrument;
use vigil_models::ids::RoleId;
use vigil_models::roles::{Role, RolePayload};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Fetches all roles, newest first (collaborator ordering).
    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> Result<Vec<Role>, ApiError> {
        let response = self.http().get(self.roles_url()).send().await?;
        Self::decode(response).await
    }

    /// Fetches a single role by id.
    #[instrument(skip(self))]
    pub async fn get_role(&self, id: RoleId) -> Result<Role, ApiError> {
        let response = self
            .http()
            .get(self.roles_url())
            .query(&[("id", id.into_inner())])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Creates a role; the collaborator assigns id and timestamps.
    #[instrument(skip(self, payload), fields(role_name = %payload.name))]
    pub async fn create_role(&self, payload: &RolePayload) -> Result<Role, ApiError> {
        let response = self
            .http()
            .post(self.roles_url())
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Replaces a role's name, description, and permission tree.
    ///
    /// `loaded_at` is the `updated_at` stamp observed when the role was
    /// loaded into the editor. The role is re-fetched immediately before
    /// the write; if the stamp moved, the update is abandoned with
    /// [`ApiError::Conflict`] and nothing is sent. The window between
    /// preflight and PUT remains; the collaborator itself keeps
    /// last-write-wins semantics.
    #[instrument(skip(self, payload), fields(role_name = %payload.name))]
    pub async fn update_role(
        &self,
        id: RoleId,
        payload: &RolePayload,
        loaded_at: DateTime<Utc>,
    ) -> Result<Role, ApiError> {
        let current = self.get_role(id).await?;
        if current.updated_at != loaded_at {
            return Err(ApiError::Conflict {
                expected: loaded_at,
                actual: current.updated_at,
            });
        }

        let response = self
            .http()
            .put(self.roles_url())
            .query(&[("id", id.into_inner())])
            .json(payload)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Deletes a role.
    ///
    /// The collaborator refuses to delete a role with assigned users; that
    /// rejection surfaces as [`ApiError::Status`] with the server's message.
    #[instrument(skip(self))]
    pub async fn delete_role(&self, id: RoleId) -> Result<(), ApiError> {
        let response = self
            .http()
            .delete(self.roles_url())
            .query(&[("id", id.into_inner())])
            .send()
            .await?;

        // The body is a `{"message": …}` acknowledgement; only failure matters.
        Self::decode::<serde_json::Value>(response).await?;
        Ok(())
    }
}
