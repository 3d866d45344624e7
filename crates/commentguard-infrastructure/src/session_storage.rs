//! File-backed session persistence.
//!
//! Stores the current session as JSON in the config directory so a
//! restart keeps the user logged in.

use crate::paths::CommentGuardPaths;
use commentguard_core::error::{CommentGuardError, Result};
use commentguard_core::session::{Session, SessionPersistence};
use std::fs;
use std::path::PathBuf;

/// Persists the session to `session.json` in the config directory.
///
/// Responsibilities:
/// - Save/load/clear the single persisted session
/// - Restrict file permissions (600 on Unix), since the bearer token is
///   stored in plaintext
///
/// Does NOT:
/// - Validate the token
/// - Log the token or any session content
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates a storage at the default location
    /// (`~/.config/commentguard/session.json`).
    pub fn new() -> Result<Self> {
        let path = CommentGuardPaths::session_file()
            .map_err(|e| CommentGuardError::storage(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a storage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    #[cfg(unix)]
    fn restrict_permissions(&self) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let permissions = fs::Permissions::from_mode(0o600);
        fs::set_permissions(&self.path, permissions)?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn restrict_permissions(&self) -> Result<()> {
        Ok(())
    }
}

impl SessionPersistence for FileSessionStorage {
    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        self.restrict_permissions()?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let session = serde_json::from_str(&content)?;
        Ok(Some(session))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commentguard_core::session::{Identity, Role};
    use tempfile::TempDir;

    fn session() -> Session {
        Session::new(
            Identity {
                user_id: 1,
                email: "user@example.com".to_string(),
                username: "user".to_string(),
                role: Role::User,
            },
            "tok-abc",
        )
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::with_path(dir.path().join("session.json"));

        storage.save(&session()).unwrap();
        let loaded = storage.load().unwrap().unwrap();

        assert_eq!(loaded.token, "tok-abc");
        assert_eq!(loaded.username, "user");
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::with_path(dir.path().join("absent.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::with_path(dir.path().join("session.json"));
        storage.save(&session()).unwrap();

        storage.clear().unwrap();

        assert!(!storage.path().exists());
        assert!(storage.load().unwrap().is_none());
        // Clearing twice is fine
        storage.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let storage = FileSessionStorage::with_path(dir.path().join("session.json"));
        storage.save(&session()).unwrap();

        let mode = std::fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
