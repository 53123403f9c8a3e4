//! Operator session, persisted locally between console invocations.
//!
//! The browser incarnation of this console kept auth state in ambient
//! local storage; here the session is an explicit value loaded from and
//! saved to a JSON file, so everything downstream (permission loading,
//! the guard) can be exercised headlessly with plain constructor input.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;
use vigil_config::SessionConfig;
use vigil_models::users::SystemUser;

/// An authenticated console session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: SystemUser,
    /// Client-generated session marker, sent along with tracked activity.
    /// Not a credential: the collaborator authorizes every request on its
    /// own terms.
    pub token: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Opens a session for a freshly authenticated operator.
    pub fn open(user: SystemUser) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(13)
            .map(char::from)
            .collect();

        Self {
            user,
            token: format!("session_{}_{}", Utc::now().timestamp_millis(), suffix),
            started_at: Utc::now(),
        }
    }
}

/// File-backed storage for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            path: config.session_file.clone(),
        }
    }

    /// Loads the current session, if any.
    ///
    /// A missing file means "not logged in". An unreadable or malformed
    /// file means the same, failing closed into the logged-out state with
    /// a warning instead of refusing to start.
    pub fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "could not read session file");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "malformed session file, ignoring");
                None
            }
        }
    }

    /// Persists the session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)
    }

    /// Discards the current session. Already logged out is not an error.
    pub fn clear(&self) -> std::io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_models::ids::UserId;

    fn operator() -> SystemUser {
        SystemUser {
            id: UserId::new(7),
            full_name: "Duty Operator".into(),
            email: None,
            login: "operator7".into(),
            role_id: None,
            company: None,
            position: None,
        }
    }

    fn store_at(dir: &std::path::Path) -> SessionStore {
        SessionStore::new(&SessionConfig {
            session_file: dir.join("session.json"),
        })
    }

    #[test]
    fn session_round_trips_through_the_store() {
        let dir = std::env::temp_dir().join(format!("vigil-session-{}", std::process::id()));
        let store = store_at(&dir);

        assert!(store.load().is_none());

        let session = Session::open(operator());
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));

        store.clear().unwrap();
        assert!(store.load().is_none());
        // Clearing twice stays quiet
        store.clear().unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_session_file_reads_as_logged_out() {
        let dir = std::env::temp_dir().join(format!("vigil-session-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let store = store_at(&dir);
        std::fs::write(dir.join("session.json"), "{not json").unwrap();

        assert!(store.load().is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn tokens_are_unique_per_session() {
        let a = Session::open(operator());
        let b = Session::open(operator());
        assert_ne!(a.token, b.token);
        assert!(a.token.starts_with("session_"));
    }
}
