//! Role editing session.
//!
//! One editor instance corresponds to one open role dialog: a working
//! permission tree the operator toggles flag by flag, plus the name and
//! description fields. Edits rebuild the working tree through the
//! immutable engine, so the last-known-good state survives any failed
//! save untouched and dirtiness is a plain value comparison.

use chrono::{DateTime, Utc};
use validator::Validate;
use vigil_api::{ApiClient, ApiError};
use vigil_core::{PermissionError, PermissionTree};
use vigil_models::ids::RoleId;
use vigil_models::roles::{Role, RolePayload};

/// Error type for editor operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The role fields do not pass validation (empty name, oversized text).
    #[error("invalid role: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// A toggle addressed a path outside the schema.
    #[error(transparent)]
    Path(#[from] PermissionError),

    /// The collaborator rejected or never received the save.
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq)]
enum EditorTarget {
    /// Creating a new role; the collaborator will assign the id.
    Create,
    /// Editing an existing role, loaded at the recorded stamp.
    Edit {
        id: RoleId,
        loaded_at: DateTime<Utc>,
    },
}

/// A role editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleEditor {
    target: EditorTarget,
    pub name: String,
    pub description: String,
    /// Last state confirmed by the collaborator (or the all-denied default
    /// for a new role). Restored implicitly on failed saves by never being
    /// overwritten until a save succeeds.
    committed: PermissionTree,
    working: PermissionTree,
}

impl RoleEditor {
    /// Starts a session for a new role, from the all-denied default.
    pub fn create() -> Self {
        let tree = PermissionTree::all_denied();
        Self {
            target: EditorTarget::Create,
            name: String::new(),
            description: String::new(),
            committed: tree.clone(),
            working: tree,
        }
    }

    /// Starts a session over an existing role.
    pub fn edit(role: &Role) -> Self {
        Self {
            target: EditorTarget::Edit {
                id: role.id,
                loaded_at: role.updated_at,
            },
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            committed: role.permissions.clone(),
            working: role.permissions.clone(),
        }
    }

    /// Fetches a role and opens an editing session over it.
    ///
    /// Failures surface to the caller as actionable errors; no partially
    /// loaded editor is ever produced.
    pub async fn load(api: &ApiClient, id: RoleId) -> Result<Self, ApiError> {
        let role = api.get_role(id).await?;
        Ok(Self::edit(&role))
    }

    /// The tree as currently toggled.
    pub fn working(&self) -> &PermissionTree {
        &self.working
    }

    /// Sets one flag. The previous working tree is replaced, not mutated.
    pub fn set(&mut self, path: &[&str], value: bool) -> Result<(), PermissionError> {
        self.working = self.working.with(path, value)?;
        Ok(())
    }

    pub fn grant(&mut self, path: &[&str]) -> Result<(), PermissionError> {
        self.set(path, true)
    }

    pub fn revoke(&mut self, path: &[&str]) -> Result<(), PermissionError> {
        self.set(path, false)
    }

    /// Whether anything differs from the last confirmed state. Compared by
    /// value: toggling a flag on and back off reads as clean.
    pub fn is_dirty(&self) -> bool {
        self.working != self.committed
    }

    /// Persists the session: `POST` for a new role, conflict-checked `PUT`
    /// for an existing one.
    ///
    /// On success the editor adopts the collaborator's response (id, fresh
    /// stamp, normalized tree) as its new base state and returns the role.
    /// On failure the working tree and the committed state are both left
    /// exactly as they were.
    pub async fn save(&mut self, api: &ApiClient) -> Result<Role, EditorError> {
        let payload = RolePayload::new(
            self.name.trim(),
            non_empty(self.description.trim()),
            self.working.clone(),
        );
        payload.validate()?;

        let saved = match &self.target {
            EditorTarget::Create => api.create_role(&payload).await?,
            EditorTarget::Edit { id, loaded_at } => {
                api.update_role(*id, &payload, *loaded_at).await?
            }
        };

        self.target = EditorTarget::Edit {
            id: saved.id,
            loaded_at: saved.updated_at,
        };
        self.committed = saved.permissions.clone();
        self.working = saved.permissions.clone();
        Ok(saved)
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_editor_starts_denied_and_clean() {
        let editor = RoleEditor::create();
        assert!(!editor.is_dirty());
        assert_eq!(editor.working(), &PermissionTree::all_denied());
    }

    #[test]
    fn toggling_marks_dirty_and_toggling_back_cleans() {
        let mut editor = RoleEditor::create();
        let path = ["layouts", "edit"];

        editor.grant(&path).unwrap();
        assert!(editor.is_dirty());
        assert!(editor.working().is_granted(&path));

        editor.revoke(&path).unwrap();
        assert!(!editor.is_dirty());
    }

    #[test]
    fn invalid_paths_leave_the_working_tree_alone() {
        let mut editor = RoleEditor::create();
        let before = editor.working().clone();

        assert!(editor.grant(&["no_such_module", "view"]).is_err());
        assert_eq!(editor.working(), &before);
        assert!(!editor.is_dirty());
    }
}
