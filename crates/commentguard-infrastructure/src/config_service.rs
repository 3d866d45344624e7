//! Configuration service implementation.
//!
//! Loads the root configuration from the configuration file
//! (`~/.config/commentguard/config.toml`), applying environment-variable
//! overrides for the two backend origins.

use crate::paths::CommentGuardPaths;
use commentguard_core::config::RootConfig;
use commentguard_core::error::{CommentGuardError, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment override for the primary REST API origin.
pub const ENV_API_BASE_URL: &str = "COMMENTGUARD_API_BASE_URL";
/// Environment override for the AI microservice origin.
pub const ENV_AI_BASE_URL: &str = "COMMENTGUARD_AI_BASE_URL";

/// Configuration service that loads and caches the root configuration.
///
/// The file is read once and cached; a missing file yields defaults and
/// writes a template so the user has something to edit.
#[derive(Clone)]
pub struct ConfigService {
    config: Arc<RwLock<Option<RootConfig>>>,
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a service reading from the default config path.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: None,
        }
    }

    /// Creates a service reading from a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            path: Some(path),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().expect("config lock poisoned");
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|err| {
            tracing::warn!("failed to load config, using defaults: {err}");
            RootConfig::default()
        });
        let loaded = Self::apply_env_overrides(loaded);

        {
            let mut write_lock = self.config.write().expect("config lock poisoned");
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().expect("config lock poisoned");
        *write_lock = None;
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => CommentGuardPaths::config_file()
                .map_err(|e| CommentGuardError::config(e.to_string())),
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;

        if !path.exists() {
            let default_config = RootConfig::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let rendered = toml::to_string_pretty(&default_config)
                .map_err(|e| CommentGuardError::config(e.to_string()))?;
            fs::write(&path, rendered)?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| CommentGuardError::Serialization {
            format: "TOML".to_string(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides(mut config: RootConfig) -> RootConfig {
        if let Ok(url) = std::env::var(ENV_API_BASE_URL) {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }
        if let Ok(url) = std::env::var(ENV_AI_BASE_URL) {
            if !url.is_empty() {
                config.ai_base_url = url;
            }
        }
        config
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_creates_template_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());

        let config = service.get_config();

        assert_eq!(config.analysis.max_window_days, 7);
        assert!(path.exists());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://api.example.com/api\"\n\n[analysis]\nmax_window_days = 14\n",
        )
        .unwrap();

        let service = ConfigService::with_path(path);
        let config = service.get_config();

        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.analysis.max_window_days, 14);
    }

    #[test]
    fn test_config_is_cached_until_invalidated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let service = ConfigService::with_path(path.clone());
        let first = service.get_config();

        std::fs::write(&path, "api_base_url = \"https://changed.example.com\"\n").unwrap();
        assert_eq!(service.get_config().api_base_url, first.api_base_url);

        service.invalidate_cache();
        assert_eq!(
            service.get_config().api_base_url,
            "https://changed.example.com"
        );
    }
}
