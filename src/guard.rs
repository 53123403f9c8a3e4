//! Effective permissions and the route guard.
//!
//! The guard decides what the console renders; it is deliberately not a
//! security boundary. The collaborator re-checks permissions on every
//! mutating request, so the worst a guard bug can do on the permissive
//! side is show a control that will be refused server-side. The design
//! here makes even that unlikely by failing closed on every load problem.

use tracing::warn;
use vigil_api::ApiClient;
use vigil_core::PermissionTree;
use vigil_models::users::SystemUser;

use crate::navigation::NavEntry;

/// Resolves the operator's effective permission tree.
///
/// The operator's `role_id` is looked up against the roles collaborator
/// and that role's (already normalized) tree is returned. Every failure
/// mode (no role assigned, unreachable collaborator, malformed response)
/// degrades to the all-denied tree with a warning, never an error: a
/// console that cannot establish permissions shows nothing gated.
pub async fn load_effective_permissions(api: &ApiClient, user: &SystemUser) -> PermissionTree {
    let Some(role_id) = user.role_id else {
        warn!(user = %user.login, "operator has no role assigned, denying all modules");
        return PermissionTree::all_denied();
    };

    match api.get_role(role_id).await {
        Ok(role) => role.permissions,
        Err(err) => {
            warn!(
                user = %user.login,
                role_id = %role_id,
                error = %err,
                "could not load effective permissions, denying all modules"
            );
            PermissionTree::all_denied()
        }
    }
}

/// Route-level visibility decisions for one operator.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGuard {
    permissions: PermissionTree,
}

impl RouteGuard {
    pub fn new(permissions: PermissionTree) -> Self {
        Self { permissions }
    }

    /// Guard for an operator whose permissions could not be established:
    /// every gated route is hidden.
    pub fn denied() -> Self {
        Self::new(PermissionTree::all_denied())
    }

    /// Whether a navigation entry (and its route) should be shown.
    pub fn allows(&self, entry: &NavEntry) -> bool {
        match entry.required_module {
            None => true,
            Some(module) => self.permissions.can_view(module),
        }
    }

    pub fn permissions(&self) -> &PermissionTree {
        &self.permissions
    }
}
