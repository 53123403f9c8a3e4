//! Local session storage location.

use std::env;
use std::path::PathBuf;

/// Session storage configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `VIGIL_SESSION_FILE`: where the current session is persisted
///   (default: `$HOME/.vigil/session.json`, falling back to
///   `.vigil/session.json` in the working directory)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Path of the JSON file holding the current session.
    pub session_file: PathBuf,
}

impl SessionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let session_file = env::var("VIGIL_SESSION_FILE").map(PathBuf::from).unwrap_or_else(|_| {
            let base = env::var("HOME").map(PathBuf::from).unwrap_or_default();
            base.join(".vigil").join("session.json")
        });

        Self { session_file }
    }
}
