//! Error type for collaborator round-trips.

use chrono::{DateTime, Utc};

/// Error type for persistence collaborator operations.
///
/// Every variant carries a message fit for direct display in the console;
/// callers never need to unwrap transport internals to tell the user what
/// went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a usable response (connection refused,
    /// timeout, malformed body).
    #[error("persistence service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator rejected the credentials.
    #[error("{message}")]
    Unauthorized { message: String },

    /// The addressed resource does not exist (stale id, deleted elsewhere).
    #[error("{message}")]
    NotFound { message: String },

    /// The role changed since it was loaded; nothing was written.
    #[error("role was changed by another session at {actual} (loaded state from {expected})")]
    Conflict {
        expected: DateTime<Utc>,
        actual: DateTime<Utc>,
    },

    /// Any other collaborator rejection, with the server's own message.
    #[error("persistence service rejected the request ({status}): {message}")]
    Status { status: u16, message: String },
}
