//! # Vigil Console
//!
//! Client-side core of the administrative console for a municipal
//! video-surveillance platform.
//!
//! The heavy lifting (camera inventory, dashboards, the CRUD surface)
//! belongs to the platform's other components. This crate owns the part
//! where a mistake grants or hides access: the hierarchical permission
//! model and everything that touches it.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── vigil-core/      # Permission schema, tree, path engine
//! ├── vigil-models/    # Roles, operators, wire DTOs
//! ├── vigil-config/    # Endpoint and session configuration from env
//! └── vigil-api/       # REST client for the persistence collaborator
//! src/
//! ├── session.rs       # Operator session, file-backed store
//! ├── guard.rs         # Effective permissions, fail-closed route guard
//! ├── navigation.rs    # Console sections and visibility filtering
//! ├── editor.rs        # Role editing session (working tree, save)
//! └── main.rs          # The `vigil` terminal console
//! ```
//!
//! ## Fail-closed by construction
//!
//! Every load path normalizes into the full canonical tree shape with
//! missing grants denied; a permission state that cannot be loaded renders
//! as "no access" rather than an error. The guard is advisory: it decides
//! what the console *shows*; the collaborator independently re-checks every
//! mutating request.

pub mod editor;
pub mod guard;
pub mod navigation;
pub mod session;

// Re-export commonly used types at crate root
pub use editor::{EditorError, RoleEditor};
pub use guard::{RouteGuard, load_effective_permissions};
pub use navigation::{NAV_ITEMS, NavEntry, filter_navigation};
pub use session::{Session, SessionStore};
