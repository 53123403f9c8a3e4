//! # Vigil Core
//!
//! Permission model for the Vigil surveillance console.
//!
//! Access rights are a fixed tree of boolean grants: seven top-level modules
//! (`home`, `monitoring`, `ord`, `layouts`, `reports`, `photo_archive`,
//! `parameters`), each containing flags such as `view`/`create`/`edit`/`delete`
//! and, for some modules, nested sub-modules up to four levels deep. A role
//! owns exactly one such tree; the console reads and writes individual flags
//! by path.
//!
//! This crate provides:
//!
//! - [`schema`]: the declarative tree shape, from which the default instance,
//!   the set of valid leaf paths, and path validation are all derived
//! - [`tree`]: [`PermissionTree`], with path-addressed reads, immutable
//!   writes, visibility queries, and fail-closed normalization of persisted
//!   blobs
//! - [`error`]: the [`PermissionError`] taxonomy
//!
//! # Example
//!
//! ```
//! use vigil_core::PermissionTree;
//!
//! let tree = PermissionTree::all_denied();
//! let tree = tree.with(&["monitoring", "view"], true).unwrap();
//!
//! assert!(tree.get(&["monitoring", "view"]).unwrap());
//! assert!(tree.can_view(&["monitoring"]));
//! assert!(!tree.can_view(&["reports"]));
//! ```

pub mod error;
pub mod schema;
pub mod tree;

// Re-export commonly used types at crate root
pub use error::PermissionError;
pub use schema::{NodeSpec, SCHEMA, leaf_paths, parse_path};
pub use tree::{PermissionNode, PermissionTree};
