//! Retry policy for upstream HTTP calls.
//!
//! | Failure | Delay before next attempt |
//! |---------|---------------------------|
//! | HTTP 429 | `rate_limit_base * 2^attempt` (1s, 2s, ...) |
//! | Any other status, network or decode error | `failure_delay` (500ms) |
//!
//! The last attempt never sleeps; its failure is returned to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use signalist::infrastructure::retry::{Backoff, FailureKind, RetryPolicy};
//!
//! let policy = RetryPolicy::default();
//! let mut backoff = Backoff::new(&policy);
//!
//! backoff.next_delay(FailureKind::RateLimited); // Some(1s)
//! backoff.next_delay(FailureKind::RateLimited); // Some(2s)
//! backoff.next_delay(FailureKind::RateLimited); // None, attempts exhausted
//! ```

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a failed attempt should be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The provider answered 429.
    RateLimited,
    /// Any other failure.
    Transient,
}

impl FailureKind {
    /// Categorize an HTTP status code.
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        if status == 429 {
            Self::RateLimited
        } else {
            Self::Transient
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first (default: 3).
    pub max_attempts: u32,
    /// Base delay after a 429, doubled per attempt (default: 1s).
    #[serde(with = "duration_millis")]
    pub rate_limit_base: Duration,
    /// Delay after any other failure (default: 500ms).
    #[serde(with = "duration_millis")]
    pub failure_delay: Duration,
    /// Upper bound for any single delay (default: 30s).
    #[serde(with = "duration_millis")]
    pub max_delay: Duration,
    /// Jitter factor for randomization (default: 0.0 = none).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_base: Duration::from_secs(1),
            failure_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            jitter_factor: 0.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given attempts and no waiting between them.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            rate_limit_base: Duration::ZERO,
            failure_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter_factor: 0.0,
        }
    }

    /// Set the jitter factor.
    #[must_use]
    pub const fn with_jitter(mut self, jitter_factor: f64) -> Self {
        self.jitter_factor = jitter_factor;
        self
    }
}

/// Per-request backoff state.
#[derive(Debug)]
pub struct Backoff {
    attempt: u32,
    max_attempts: u32,
    rate_limit_base_ms: u64,
    failure_delay_ms: u64,
    max_delay_ms: u64,
    jitter_factor: f64,
}

impl Backoff {
    /// Start a new request under `policy`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            max_attempts: policy.max_attempts,
            rate_limit_base_ms: policy.rate_limit_base.as_millis() as u64,
            failure_delay_ms: policy.failure_delay.as_millis() as u64,
            max_delay_ms: policy.max_delay.as_millis() as u64,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Record a failed attempt and get the delay before the next one.
    ///
    /// Returns `None` if the failed attempt was the last allowed.
    pub fn next_delay(&mut self, kind: FailureKind) -> Option<Duration> {
        let failed_attempt = self.attempt;
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            return None;
        }

        let base_ms = match kind {
            FailureKind::RateLimited => self
                .rate_limit_base_ms
                .saturating_mul(2u64.saturating_pow(failed_attempt)),
            FailureKind::Transient => self.failure_delay_ms,
        };

        let capped_ms = self.apply_jitter(base_ms).min(self.max_delay_ms);
        Some(Duration::from_millis(capped_ms))
    }

    /// Attempts made so far.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Random value in [delay * (1 - jitter), delay * (1 + jitter)].
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn apply_jitter(&self, delay_ms: u64) -> u64 {
        if self.jitter_factor <= 0.0 || delay_ms == 0 {
            return delay_ms;
        }
        let range = delay_ms as f64 * self.jitter_factor;
        let min = (delay_ms as f64 - range).max(0.0);
        let max = delay_ms as f64 + range;
        rand::rng().random_range(min..=max) as u64
    }
}

/// Serialize durations as integer milliseconds.
mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
