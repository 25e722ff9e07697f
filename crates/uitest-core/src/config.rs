//! Test run configuration

use crate::cache::CacheConfig;
use crate::logging::LoggingConfig;
use crate::result::{UiTestError, UiTestResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "UITEST_CONFIG";

/// Configuration for a test run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiTestConfig {
    /// Cache cleanup
    pub cache: CacheConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl UiTestConfig {
    /// Parse YAML
    pub fn from_yaml_str(yaml: &str) -> UiTestResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON
    pub fn from_json_str(json: &str) -> UiTestResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file, format chosen by extension (`yaml`, `yml` or `json`)
    pub fn load(path: &Path) -> UiTestResult<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(UiTestError::config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// Load the file named by `UITEST_CONFIG`, defaults when unset
    pub fn from_env() -> UiTestResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Check every section
    pub fn validate(&self) -> UiTestResult<()> {
        self.cache
            .validate()
            .map_err(|e| UiTestError::config(format!("cache: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_yaml_partial_override() {
        let config = UiTestConfig::from_yaml_str(
            "cache:\n  excludes: [keep.db]\n  delete:\n    timeout_ms: 1000\n",
        )
        .unwrap();
        assert_eq!(config.cache.excludes, vec!["keep.db"]);
        assert_eq!(config.cache.delete.timeout_ms, 1000);
        assert_eq!(config.cache.delete.frequency_ms, 500);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_json() {
        let config = UiTestConfig::from_json_str(r#"{"logging": {"json": true}}"#).unwrap();
        assert!(config.logging.json);
    }

    #[test]
    fn test_invalid_wait_options_rejected() {
        let err = UiTestConfig::from_yaml_str("cache:\n  delete:\n    frequency_ms: 0\n")
            .unwrap_err();
        assert!(matches!(err, UiTestError::Config { .. }));
        assert!(err.to_string().contains("cache:"));
    }

    #[test]
    fn test_load_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "logging:\n  filter: debug").unwrap();
        let config = UiTestConfig::load(file.path()).unwrap();
        assert_eq!(config.logging.filter, "debug");

        let other = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = UiTestConfig::load(other.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }
}
