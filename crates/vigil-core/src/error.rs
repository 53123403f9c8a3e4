//! Error types for permission tree operations.

/// Error type for path-addressed tree operations.
///
/// Every variant is a schema/path mismatch, i.e. a programming defect at the
/// call site rather than a user-facing condition. UI boundaries that cannot
/// afford to propagate (navigation rendering, checkbox state) should use
/// [`crate::PermissionTree::is_granted`], which logs and falls back to
/// `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    #[error("empty permission path")]
    EmptyPath,

    #[error("unknown segment `{segment}` in permission path `{path}`")]
    UnknownSegment { path: String, segment: String },

    #[error("permission path `{path}` descends through flag `{segment}`")]
    TraversesLeaf { path: String, segment: String },

    #[error("permission path `{path}` ends on a module, not a flag")]
    EndsOnGroup { path: String },
}

/// Renders a path as the dotted form used in messages and logs.
pub(crate) fn join_path(path: &[&str]) -> String {
    path.join(".")
}
