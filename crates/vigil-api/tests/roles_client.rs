//! Collaborator client tests against a mocked HTTP server.

use chrono::{DateTime, Utc};
use serde_json::json;
use vigil_api::{ApiClient, ApiError};
use vigil_config::ApiConfig;
use vigil_core::PermissionTree;
use vigil_models::ids::RoleId;
use vigil_models::roles::RolePayload;
use vigil_models::users::LoginRequest;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
        roles_url: format!("{}/roles", server.uri()),
        auth_url: format!("{}/auth", server.uri()),
        timeout_seconds: 5,
    })
    .unwrap()
}

fn role_body(id: i64, name: &str, updated_at: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "",
        "permissions": { "monitoring": { "view": true } },
        "users_count": 0,
        "created_at": "2025-10-01T08:00:00Z",
        "updated_at": updated_at
    })
}

#[tokio::test]
async fn list_roles_decodes_and_normalizes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            role_body(1, "Administrator", "2025-10-02T08:00:00Z"),
            role_body(2, "Operator", "2025-10-03T08:00:00Z"),
        ])))
        .mount(&server)
        .await;

    let roles = client_for(&server).list_roles().await.unwrap();

    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "Administrator");
    // Normalization happens on the way in: unlisted modules exist, denied
    assert_eq!(roles[1].permissions.get(&["monitoring", "view"]), Ok(true));
    assert_eq!(roles[1].permissions.get(&["reports", "view"]), Ok(false));
}

#[tokio::test]
async fn get_role_surfaces_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .and(query_param("id", "99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Role not found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_role(RoleId::new(99)).await.unwrap_err();

    match err {
        ApiError::NotFound { message } => assert_eq!(message, "Role not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn create_role_sends_the_full_tree() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/roles"))
        // Even ungranted modules must be materialized in the body
        .and(body_partial_json(json!({
            "name": "Operator",
            "permissions": {
                "home": { "view": false },
                "monitoring": { "view": true }
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(role_body(7, "Operator", "2025-10-05T08:00:00Z")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let permissions = PermissionTree::all_denied()
        .with(&["monitoring", "view"], true)
        .unwrap();
    let payload = RolePayload::new("Operator", None, permissions);

    let created = client_for(&server).create_role(&payload).await.unwrap();
    assert_eq!(created.id, RoleId::new(7));
}

#[tokio::test]
async fn update_role_replaces_wholesale_when_unchanged() {
    let server = MockServer::start().await;
    let loaded_at: DateTime<Utc> = "2025-10-03T08:00:00Z".parse().unwrap();

    Mock::given(method("GET"))
        .and(path("/roles"))
        .and(query_param("id", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(role_body(2, "Operator", "2025-10-03T08:00:00Z")),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/roles"))
        .and(query_param("id", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(role_body(2, "Senior Operator", "2025-10-06T08:00:00Z")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payload = RolePayload::new("Senior Operator", None, PermissionTree::all_denied());
    let updated = client_for(&server)
        .update_role(RoleId::new(2), &payload, loaded_at)
        .await
        .unwrap();

    assert_eq!(updated.name, "Senior Operator");
}

#[tokio::test]
async fn update_role_aborts_on_concurrent_change() {
    let server = MockServer::start().await;
    let loaded_at: DateTime<Utc> = "2025-10-03T08:00:00Z".parse().unwrap();

    Mock::given(method("GET"))
        .and(path("/roles"))
        .and(query_param("id", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                // Someone saved after we loaded
                .set_body_json(role_body(2, "Operator", "2025-10-04T12:00:00Z")),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let payload = RolePayload::new("Operator", None, PermissionTree::all_denied());
    let err = client_for(&server)
        .update_role(RoleId::new(2), &payload, loaded_at)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[tokio::test]
async fn delete_role_surfaces_server_refusal() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/roles"))
        .and(query_param("id", "2"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Cannot delete role with 3 assigned users"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).delete_role(RoleId::new(2)).await.unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Cannot delete role with 3 assigned users");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn login_returns_the_operator() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_partial_json(json!({"login": "operator7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "user": {
                "id": 7,
                "full_name": "Duty Operator",
                "email": "operator7@example.org",
                "login": "operator7",
                "role_id": 2
            }
        })))
        .mount(&server)
        .await;

    let user = client_for(&server)
        .login(&LoginRequest {
            login: "operator7".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.login, "operator7");
    assert_eq!(user.role_id, Some(RoleId::new(2)));
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid login or password"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .login(&LoginRequest {
            login: "operator7".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
}
