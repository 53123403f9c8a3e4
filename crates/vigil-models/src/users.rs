//! System user (console operator) models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{RoleId, UserId};

/// The authenticated operator, as returned by the auth collaborator.
///
/// `role_id` is what ties an operator to their effective permissions: the
/// console resolves it to a role and reads that role's tree. An operator
/// with no role assigned is treated as having no grants at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemUser {
    pub id: UserId,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub login: String,
    #[serde(default)]
    pub role_id: Option<RoleId>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// Body of the login request sent to the auth collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
