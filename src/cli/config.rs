//! CLI configuration
//!
//! JSON file, every key optional. Without `--config` the defaults apply.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log severity: "trace", "info", "warn" or "error" (default "warn")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Pretty-print command output (default false)
    #[serde(default)]
    pub pretty_output: bool,

    /// Largest batch a single command accepts (default 100000)
    #[serde(default = "default_max_batch_items")]
    pub max_batch_items: usize,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_batch_items() -> usize {
    100_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            pretty_output: false,
            max_batch_items: default_max_batch_items(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        if Severity::parse(&self.log_level).is_none() {
            return Err(CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error.",
                self.log_level
            )));
        }

        if self.max_batch_items == 0 {
            return Err(CliError::config_error("max_batch_items must be > 0"));
        }

        Ok(())
    }

    /// Minimum log severity
    pub fn severity(&self) -> Severity {
        Severity::parse(&self.log_level).unwrap_or(Severity::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("venue-models.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert!(!config.pretty_output);
        assert_eq!(config.max_batch_items, 100_000);
        assert_eq!(config.severity(), Severity::Warn);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"log_level": "trace", "pretty_output": true, "max_batch_items": 10}"#,
        );

        let config = Config::load(&path).unwrap();
        assert_eq!(config.severity(), Severity::Trace);
        assert!(config.pretty_output);
        assert_eq!(config.max_batch_items, 10);
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"log_level": "verbose"}"#);

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "CLI_CONFIG_ERROR");
        assert!(err.message().contains("verbose"));
    }

    #[test]
    fn test_zero_batch_limit_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"max_batch_items": 0}"#);
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::load(Path::new("/nonexistent/venue-models.json")).unwrap_err();
        assert_eq!(err.code_str(), "CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
