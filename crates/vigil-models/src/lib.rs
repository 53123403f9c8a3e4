//! # Vigil Models
//!
//! Domain models and DTOs for the Vigil console.
//!
//! The console holds denormalized copies of what the persistence
//! collaborator returns; these types define that wire shape and nothing
//! else. Permission blobs are normalized into a canonical
//! [`vigil_core::PermissionTree`] at deserialization time, so no partial
//! tree ever reaches the rest of the application.
//!
//! # Modules
//!
//! - [`ids`]: typed id newtypes
//! - [`roles`]: roles and their permission payloads
//! - [`users`]: the authenticated operator

pub mod ids;
pub mod roles;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use ids::{RoleId, UserId};
pub use roles::{Role, RolePayload};
pub use users::{LoginRequest, SystemUser};
