//! Polling retry helper.
//!
//! Absorbs transient failures from state the test does not control (a file
//! handle not yet released, a view not yet laid out) by re-running an
//! operation until it succeeds or a wall-clock budget runs out. The budget is
//! time-bounded rather than attempt-bounded.

use crate::result::{UiTestError, UiTestResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default polling frequency (500ms)
pub const DEFAULT_FREQUENCY_MS: u64 = 500;

/// Default total timeout (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Polling frequency and total timeout for [`wait_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    /// Sleep between attempts, in milliseconds
    pub frequency_ms: u64,
    /// Total budget, in milliseconds
    pub timeout_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            frequency_ms: DEFAULT_FREQUENCY_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set polling frequency in milliseconds
    #[must_use]
    pub const fn with_frequency(mut self, frequency_ms: u64) -> Self {
        self.frequency_ms = frequency_ms;
        self
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Get frequency as Duration
    #[must_use]
    pub const fn frequency(&self) -> Duration {
        Duration::from_millis(self.frequency_ms)
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check `timeout >= frequency > 0`
    pub fn validate(&self) -> UiTestResult<()> {
        if self.frequency_ms == 0 || self.timeout_ms < self.frequency_ms {
            return Err(UiTestError::InvalidWaitOptions {
                frequency_ms: self.frequency_ms,
                timeout_ms: self.timeout_ms,
            });
        }
        Ok(())
    }

    /// Upper bound on attempts: `ceil(timeout / frequency)`
    ///
    /// Only meaningful for validated options.
    #[must_use]
    pub const fn max_attempts(&self) -> u64 {
        if self.frequency_ms == 0 {
            return 1;
        }
        self.timeout_ms.div_ceil(self.frequency_ms)
    }
}

// =============================================================================
// POLLING
// =============================================================================

/// Run `operation` until it returns `Ok` or the budget in `options` runs out.
///
/// The operation runs at least once and at most
/// [`WaitOptions::max_attempts`] times. On exhaustion the error from the
/// last attempt is returned unchanged.
pub fn wait_for<T, F>(options: &WaitOptions, mut operation: F) -> UiTestResult<T>
where
    F: FnMut() -> UiTestResult<T>,
{
    options.validate()?;

    let max_attempts = options.max_attempts();
    let frequency = options.frequency();
    let timeout = options.timeout();
    let start = Instant::now();
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        let err = match operation() {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let elapsed = start.elapsed();
        if attempt >= max_attempts || elapsed + frequency > timeout {
            warn!(
                attempts = attempt,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %err,
                "wait budget exhausted"
            );
            return Err(err);
        }

        debug!(attempt, error = %err, "attempt failed, retrying");
        std::thread::sleep(frequency);
    }
}

/// Boolean flavour of [`wait_for`]: a final `false` becomes an assertion
/// failure naming `description`.
pub fn wait_until<F>(options: &WaitOptions, description: &str, mut predicate: F) -> UiTestResult<()>
where
    F: FnMut() -> bool,
{
    wait_for(options, || {
        if predicate() {
            Ok(())
        } else {
            Err(UiTestError::assertion(format!(
                "condition not met within {}ms: {description}",
                options.timeout_ms
            )))
        }
    })
}
