//! Client configuration model.
//!
//! Loaded from `config.toml` in the platform config directory, with
//! environment-variable overrides for the two backend origins.

use crate::analysis::WindowPolicy;
use serde::{Deserialize, Serialize};

/// Root configuration for the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    /// Base URL of the primary REST API origin.
    pub api_base_url: String,
    /// Base URL of the AI microservice origin. Distinct from the primary
    /// API; the two must not be conflated.
    pub ai_base_url: String,
    pub analysis: AnalysisConfig,
    pub cache: CacheConfig,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8081/api".to_string(),
            ai_base_url: "http://localhost:8000".to_string(),
            analysis: AnalysisConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Analysis-related policy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum crawl/analysis window in days.
    pub max_window_days: i64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { max_window_days: 7 }
    }
}

impl AnalysisConfig {
    pub fn window_policy(&self) -> WindowPolicy {
        WindowPolicy {
            max_days: self.max_window_days,
        }
    }
}

/// Query-cache tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Dashboard refetch interval in seconds.
    pub poll_interval_secs: u64,
    /// Entries unobserved for this long are garbage-collected.
    pub idle_evict_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 30,
            idle_evict_secs: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RootConfig::default();
        assert_eq!(config.analysis.max_window_days, 7);
        assert_eq!(config.cache.poll_interval_secs, 30);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: RootConfig =
            toml::from_str("api_base_url = \"https://api.example.com/api\"").unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.ai_base_url, "http://localhost:8000");
        assert_eq!(config.cache.idle_evict_secs, 300);
    }
}
