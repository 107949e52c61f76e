//! Persisted session: the bearer token and the signed-in user, stored side by side
//! under the `token` and `user` keys and always cleared together.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use quill_shared::dto::UserResponse;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserResponse,
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, ClientError>;
    fn save(&self, session: &Session) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;

    fn token(&self) -> Option<String> {
        self.load().ok().flatten().map(|s| s.token)
    }
}

/// JSON file holding `{"token": ..., "user": ...}`.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/quill/session.json`, falling back to the temp dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("quill")
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        // A half-written or foreign file is treated as signed out.
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Ignoring unreadable session file");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local session, lost on exit.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, ClientError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| ClientError::Session(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, session: &Session) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ClientError::Session(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| ClientError::Session(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::Utc;
    use quill_shared::dto::ProfileData;
    use uuid::Uuid;

    use super::*;

    pub(crate) fn user(role: &str) -> UserResponse {
        UserResponse {
            id: Uuid::new_v4(),
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            role: role.to_string(),
            profile: ProfileData::default(),
            created_at: Utc::now(),
        }
    }

    fn temp_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("quill-session-{}", Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let store = FileSessionStore::new(temp_file());
        assert_eq!(store.load().unwrap(), None);

        let session = Session {
            token: "abc".to_string(),
            user: user("user"),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));
        assert_eq!(store.token().as_deref(), Some("abc"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_uses_token_and_user_keys() {
        let store = FileSessionStore::new(temp_file());
        store
            .save(&Session {
                token: "abc".to_string(),
                user: user("admin"),
            })
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["token"], "abc");
        assert_eq!(raw["user"]["role"], "admin");

        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_signed_out() {
        let store = FileSessionStore::new(temp_file());
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySessionStore::new();
        assert!(store.token().is_none());

        store
            .save(&Session {
                token: "t".to_string(),
                user: user("user"),
            })
            .unwrap();
        assert_eq!(store.token().as_deref(), Some("t"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
