//! Geometric backoff policy.

use {
    crate::error::{Error, Result},
    std::time::Duration,
};

/// Immutable retry policy shared across many retry executions.
///
/// The delay before attempt `n + 1` is
/// `initial_delay * multiplier^(n - 1)` for attempt `n` (1-indexed), so
/// the default policy waits 1s, then 2s, then gives up after the third
/// attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    multiplier: f64,
}

impl RetryPolicy {
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// 3 attempts, 1 second initial delay, doubling backoff.
    #[must_use]
    pub fn default_policy() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2.0,
        }
    }

    /// Single attempt, failing immediately on the first error.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Delay to wait after the given 1-indexed attempt fails.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        self.initial_delay.mul_f64(self.multiplier.powi(exponent))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::default_policy()
    }
}

/// Validating builder for [`RetryPolicy`].
#[derive(Debug)]
pub struct RetryPolicyBuilder {
    max_attempts: u32,
    initial_delay: Duration,
    multiplier: f64,
}

impl Default for RetryPolicyBuilder {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicyBuilder {
    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    #[must_use]
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Fails when `max_attempts` is 0 or `multiplier` is below 1.0.
    pub fn build(self) -> Result<RetryPolicy> {
        if self.max_attempts < 1 {
            return Err(Error::invalid_policy("max_attempts must be >= 1"));
        }
        if self.multiplier < 1.0 {
            return Err(Error::invalid_policy("multiplier must be >= 1.0"));
        }
        Ok(RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: self.initial_delay,
            multiplier: self.multiplier,
        })
    }
}
