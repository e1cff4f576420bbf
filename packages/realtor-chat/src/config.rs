//! Client configuration
//!
//! Loaded from `config.toml` in the platform config directory, overridable
//! with `REALTOR_CONFIG`. `REALTOR_API_URL` overrides the API URL.

use realtor_core::Language;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the assistant backend
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Initial display language; detected from the locale when unset
    pub language: Option<Language>,
    /// Extra phrase table appended to the built-in one
    pub phrases_file: Option<PathBuf>,
    /// Default tracing filter directive when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            language: None,
            phrases_file: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("REALTOR_CONFIG") {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }

        directories::ProjectDirs::from("com", "realtor", "realtor-chat")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("realtor-chat.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` (or the default path) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::load_from_path(&Self::default_path())?,
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("REALTOR_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// The configured language, or the one implied by the process locale.
    pub fn initial_language(&self) -> Language {
        self.language.unwrap_or_else(detect_locale)
    }
}

/// Language from `LC_ALL`, `LC_MESSAGES` or `LANG`, defaulting to English.
pub fn detect_locale() -> Language {
    let candidates = ["LC_ALL", "LC_MESSAGES", "LANG"];
    for key in candidates {
        if let Ok(value) = env::var(key) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            return trimmed.parse().unwrap_or_default();
        }
    }
    Language::En
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://realtor.example:9000\"").unwrap();
        writeln!(file, "language = \"zh\"").unwrap();

        let config = Config::load_from_path(file.path()).unwrap();
        assert_eq!(config.api_url, "http://realtor.example:9000");
        assert_eq!(config.language, Some(Language::Zh));
        assert_eq!(config.initial_language(), Language::Zh);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.phrases_file.is_none());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "language = \"fr\"").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
