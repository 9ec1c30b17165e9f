//! Persisted login session.
//!
//! Stores the logged-in user's public profile as a JSON file so the client
//! stays authenticated across restarts. An unreadable or corrupt file is
//! treated as logged out and removed.

use std::fs;
use std::path::{Path, PathBuf};

use entities::UserPublic;
use tracing::warn;

use crate::error::ClientResult;

/// File-backed session state. At most one user is logged in at a time.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    user: Option<UserPublic>,
}

impl SessionStore {
    /// Load the session from `path`. A missing file means logged out; a
    /// corrupt one is discarded.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let user = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Discarding corrupt session file");
                    fs::remove_file(&path).ok();
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Session file unreadable");
                None
            }
        };
        Self { path, user }
    }

    /// The file backing this session.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&UserPublic> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Record `user` as logged in and persist it.
    pub fn remember(&mut self, user: UserPublic) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec(&user).map_err(std::io::Error::other)?)?;
        self.user = Some(user);
        Ok(())
    }

    /// Log out and delete the persisted session.
    pub fn clear(&mut self) -> ClientResult<()> {
        self.user = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn temp_session_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hospital-session-{tag}-{}.json", std::process::id()))
    }

    fn sample_user() -> UserPublic {
        UserPublic {
            id: 7,
            email: "alice@x.com".to_string(),
            full_name: "Alice A".to_string(),
            phone: "0912345678".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_file_means_logged_out() {
        let path = temp_session_path("missing");
        let session = SessionStore::load(&path);
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
    }

    #[test]
    fn test_remember_survives_reload() {
        let path = temp_session_path("reload");
        let mut session = SessionStore::load(&path);
        session.remember(sample_user()).unwrap();

        let reloaded = SessionStore::load(&path);
        assert!(reloaded.is_authenticated());
        let user = reloaded.current_user().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.email, "alice@x.com");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_clear_removes_the_file() {
        let path = temp_session_path("clear");
        let mut session = SessionStore::load(&path);
        session.remember(sample_user()).unwrap();
        assert!(path.exists());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert!(!path.exists());

        // Clearing twice is fine.
        session.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let path = temp_session_path("corrupt");
        fs::write(&path, b"not json {").unwrap();

        let session = SessionStore::load(&path);
        assert!(!session.is_authenticated());
        assert!(!path.exists());
    }
}
