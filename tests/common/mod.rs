//! Shared helpers for the console integration tests.

#![allow(dead_code)]

use serde_json::json;
use vigil_api::ApiClient;
use vigil_config::ApiConfig;
use vigil_models::ids::{RoleId, UserId};
use vigil_models::users::SystemUser;
use wiremock::MockServer;

/// Client wired to a mock collaborator.
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
        roles_url: format!("{}/roles", server.uri()),
        auth_url: format!("{}/auth", server.uri()),
        timeout_seconds: 5,
    })
    .unwrap()
}

/// A role body in the collaborator's wire shape.
pub fn role_json(
    id: i64,
    name: &str,
    updated_at: &str,
    permissions: serde_json::Value,
) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "permissions": permissions,
        "users_count": 0,
        "created_at": "2025-10-01T08:00:00Z",
        "updated_at": updated_at
    })
}

/// An operator, optionally with a role assigned.
pub fn operator(role_id: Option<i64>) -> SystemUser {
    SystemUser {
        id: UserId::new(7),
        full_name: "Duty Operator".into(),
        email: Some("operator7@example.org".into()),
        login: "operator7".into(),
        role_id: role_id.map(RoleId::new),
        company: None,
        position: None,
    }
}
