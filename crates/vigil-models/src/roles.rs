//! Role domain models and DTOs.
//!
//! A role is a named, persisted bundle of one permission tree plus metadata,
//! assignable to system users. The collaborator owns ids and timestamps; the
//! console only ever holds denormalized copies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use vigil_core::PermissionTree;

use crate::ids::RoleId;

/// A role as returned by the persistence collaborator.
///
/// Deserializing always yields a canonical permission tree: a missing
/// `permissions` blob, missing modules, or unknown keys all normalize
/// fail-closed instead of erroring (older persisted roles stay loadable
/// across schema additions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: PermissionTree,
    /// Number of system users currently assigned this role. Maintained by
    /// the collaborator; a role with users cannot be deleted.
    #[serde(default)]
    pub users_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of role create/replace requests.
///
/// The full tree is sent every time: a wholesale replace, never a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RolePayload {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name must be between 1 and 100 characters"
    ))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,
    pub permissions: PermissionTree,
}

impl RolePayload {
    pub fn new(name: impl Into<String>, description: Option<String>, permissions: PermissionTree) -> Self {
        Self {
            name: name.into(),
            description,
            permissions,
        }
    }
}
