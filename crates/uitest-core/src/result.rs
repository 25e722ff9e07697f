//! Result and error types for uitest.

use thiserror::Error;

/// Result type for uitest operations
pub type UiTestResult<T> = Result<T, UiTestError>;

/// Errors that can occur while locating, acting on or checking views
#[derive(Debug, Error)]
pub enum UiTestError {
    /// Assertion failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// No view in the hierarchy matched the locator
    #[error("No views in hierarchy found matching: {description}")]
    NoMatchingView {
        /// Locator description
        description: String,
    },

    /// More than one view matched a locator that requires a single match
    #[error("'{description}' matches {count} views in the hierarchy")]
    AmbiguousMatch {
        /// Locator description
        description: String,
        /// Number of matching views
        count: usize,
    },

    /// The target view does not satisfy the action's constraints
    #[error("Error performing '{action}' on view '{view}': {reason}")]
    ActionRejected {
        /// Action description
        action: String,
        /// Target view summary
        view: String,
        /// Why the action was rejected
        reason: String,
    },

    /// Polling options violate `timeout >= frequency > 0`
    #[error("Invalid wait options: frequency {frequency_ms}ms, timeout {timeout_ms}ms")]
    InvalidWaitOptions {
        /// Polling frequency in milliseconds
        frequency_ms: u64,
        /// Total timeout in milliseconds
        timeout_ms: u64,
    },

    /// Invalid regular expression given to a text matcher
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl UiTestError {
    /// Create an assertion failure
    #[must_use]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is an assertion-style failure (as opposed to
    /// misuse or environment errors)
    #[must_use]
    pub const fn is_assertion(&self) -> bool {
        matches!(
            self,
            Self::AssertionFailed { .. } | Self::NoMatchingView { .. } | Self::AmbiguousMatch { .. }
        )
    }
}
