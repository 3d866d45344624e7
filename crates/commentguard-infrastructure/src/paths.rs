//! Unified path management for CommentGuard client files.
//!
//! All configuration and local fallback data live under the platform
//! config/data directories, consistently across Linux, macOS and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for the client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/commentguard/       # Config directory
/// ├── config.toml               # Client configuration
/// └── session.json              # Persisted session (token included)
///
/// ~/.local/share/commentguard/  # Data directory
/// └── local_store.json          # Fallback key-value store (templates)
/// ```
pub struct CommentGuardPaths;

impl CommentGuardPaths {
    const APP_DIR: &'static str = "commentguard";

    /// Returns the client configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the client data directory, used for the local fallback
    /// store.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    ///
    /// # Security Note
    ///
    /// The file contains the bearer token. Implementations writing it set
    /// permissions to 600 on Unix.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }

    /// Returns the path to the local fallback key-value store.
    pub fn local_store_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("local_store.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = CommentGuardPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("commentguard"));
    }

    #[test]
    fn test_config_file_under_config_dir() {
        let config_file = CommentGuardPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        assert!(config_file.starts_with(CommentGuardPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_session_file_under_config_dir() {
        let session_file = CommentGuardPaths::session_file().unwrap();
        assert!(session_file.ends_with("session.json"));
        assert!(session_file.starts_with(CommentGuardPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_local_store_under_data_dir() {
        let store_file = CommentGuardPaths::local_store_file().unwrap();
        assert!(store_file.ends_with("local_store.json"));
        assert!(store_file.starts_with(CommentGuardPaths::data_dir().unwrap()));
    }
}
