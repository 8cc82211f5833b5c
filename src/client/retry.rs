//! Bounded exponential backoff for per-host operations

use crate::common::RetryConfig;
use std::time::Duration;

/// Retry policy with clamped exponential backoff.
///
/// The wait after failed attempt `n` (1-based) is
/// `clamp(multiplier * 2^(n-1), min_wait, max_wait)`. With the defaults
/// (3 attempts, 1s multiplier, 1s..10s bounds) a host that keeps failing
/// is tried at t=0, t=1s and t=3s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    pub max_attempts: u32,
    pub multiplier: Duration,
    pub min_wait: Duration,
    pub max_wait: Duration,
    /// Per-attempt timeout
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryConfig::default().policy()
    }
}

impl RetryPolicy {
    /// Wait before the attempt following failed attempt `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let raw = self.multiplier.saturating_mul(1u32 << exponent);
        // max_wait wins if the bounds are inverted
        raw.max(self.min_wait).min(self.max_wait)
    }

    /// Waits between consecutive attempts, in order.
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..self.max_attempts).map(move |attempt| self.backoff(attempt))
    }

    /// Total attempts, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
