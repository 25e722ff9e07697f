//! Tracing subscriber setup for test runs.

use serde::{Deserialize, Serialize};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable overriding [`LoggingConfig::filter`]
pub const LOG_ENV: &str = "UITEST_LOG";

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `uitest_core=debug`
    pub filter: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn,uitest_core=info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Filter built from `UITEST_LOG` when set, the configured directive otherwise
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Install the global subscriber
///
/// Returns `false` when a subscriber was already installed, which makes
/// calling this from every test harmless.
pub fn init(config: &LoggingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.env_filter());
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_test_writer())
            .try_init()
    } else {
        registry
            .with(fmt::layer().compact().with_target(true).with_test_writer())
            .try_init()
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "warn,uitest_core=info");
        assert!(!config.json);
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        let config = LoggingConfig::default();
        let _ = init(&config);
        assert!(!init(&config));
        tracing::info!("still logging");
    }
}
