use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LapviewError, Result};
use crate::filter::FilterCriteria;

/// Environment override for the catalog service base URL
pub const API_URL_ENV: &str = "LAPVIEW_API_URL";

/// Environment override for the config file location
pub const CONFIG_PATH_ENV: &str = "LAPVIEW_CONFIG";

/// Global lapview configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog service API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Filters applied when `lapview list` is given none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_criteria: Option<FilterCriteria>,
}

fn default_api_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            default_criteria: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| LapviewError::ConfigError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Effective API base URL, honoring `LAPVIEW_API_URL`
    pub fn api_url(&self) -> String {
        resolve_api_url(&self.api_url, std::env::var(API_URL_ENV).ok())
    }

    /// Get the config file path
    ///
    /// Supports LAPVIEW_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "lapview").ok_or_else(|| {
            LapviewError::ConfigError("Could not determine config directory".into())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(LapviewError::ConfigError(
                "timeout_secs must be at least 1".into(),
            ));
        }
        if self.api_url.trim().is_empty() {
            return Err(LapviewError::ConfigError("api_url is empty".into()));
        }
        Ok(())
    }
}

fn resolve_api_url(configured: &str, env_override: Option<String>) -> String {
    env_override
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lapview-config-{}-{}", std::process::id(), name))
            .join("config.toml")
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000/api/v1");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.default_criteria.is_none());
    }

    #[test]
    fn test_env_override_wins_when_set() {
        assert_eq!(resolve_api_url("http://a/api", None), "http://a/api");
        assert_eq!(
            resolve_api_url("http://a/api", Some("http://b/api".into())),
            "http://b/api"
        );
        assert_eq!(resolve_api_url("http://a/api", Some("  ".into())), "http://a/api");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = Config::load_from(&temp_path("missing")).unwrap();
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let mut config = Config::default();
        config.timeout_secs = 5;
        let mut criteria = FilterCriteria::default();
        criteria.brand = Some("Lenovo".into());
        criteria.min_rating = Some(4.0);
        config.default_criteria = Some(criteria.clone());

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.timeout_secs, 5);
        assert_eq!(loaded.default_criteria, Some(criteria));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "api_url = \"http://example.test/api/v1\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, "http://example.test/api/v1");
        assert_eq!(config.timeout_secs, 60);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let path = temp_path("zero");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "timeout_secs = 0\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(LapviewError::ConfigError(_))
        ));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
