//! # Vigil API
//!
//! Async REST client for the persistence collaborator.
//!
//! The collaborator is an opaque JSON-over-HTTP service: roles are listed,
//! fetched, created, replaced wholesale, and deleted; login verifies
//! operator credentials. This crate wraps those round-trips, decodes the
//! collaborator's `{"error": …}` bodies into an actionable [`ApiError`],
//! and implements the optimistic-concurrency preflight used when replacing
//! a role.
//!
//! All calls are plain request/response; nothing here holds state beyond
//! the underlying HTTP connection pool.

pub mod auth;
pub mod client;
pub mod error;
pub mod roles;

// Re-export commonly used types at crate root
pub use client::ApiClient;
pub use error::ApiError;
