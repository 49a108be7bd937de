//! Retry of rate-limited requests with randomized exponential backoff.
//!
//! The loop itself lives in [`crate::transport`]; this module holds the
//! pieces it is built from:
//!
//! - [`Backoff`] computes the delay before the next attempt
//! - [`RetryPolicy`] decides whether a failure is retryable at all
//! - [`RetryState`] tracks attempts and yields a [`RetryDecision`]

use std::time::Duration;

use crate::error::ClientError;

/// Backoff strategy between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed {
        /// Delay between retries.
        delay: Duration,
    },
    /// Uses an exponential delay between retries.
    ///
    /// The ceiling is `base * (factor ^ attempt)` capped at `max`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Pick a uniformly random delay between `base` and the ceiling.
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_secs(1),
            factor: 2.0,
            max: Duration::from_secs(20),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Calculate the delay for a given retry attempt (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
                let seconds = base.as_secs_f64() * factor.powi(exponent);
                let ceiling = Duration::from_secs_f64(seconds.min(max.as_secs_f64()));

                if !jitter || ceiling <= base {
                    return ceiling;
                }

                let floor_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
                let ceiling_ms = u64::try_from(ceiling.as_millis()).unwrap_or(u64::MAX);
                Duration::from_millis(fastrand::u64(floor_ms..=ceiling_ms))
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 5,
            backoff: Backoff::default(),
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with fixed backoff.
    pub fn fixed(delay: Duration, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed { delay },
            ..Self::default()
        }
    }

    /// Disable retries: every call makes a single attempt.
    pub fn no_retry() -> Self {
        Self {
            enabled: false,
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Calculate the delay for a given retry attempt.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}

/// Decides whether a failed attempt may be repeated.
pub trait RetryPolicy: Send + Sync {
    fn is_retryable(&self, error: &ClientError) -> bool;
}

/// Default policy: only HTTP 429 responses are retried.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimitPolicy;

impl RetryPolicy for RateLimitPolicy {
    fn is_retryable(&self, error: &ClientError) -> bool {
        error.status() == Some(429)
    }
}

/// Outcome of feeding a failure into [`RetryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter(Duration),
    GiveUp,
}

/// Attempt bookkeeping for one logical call.
#[derive(Debug, Clone)]
pub struct RetryState {
    attempts: u32,
    config: RetryConfig,
}

impl RetryState {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            attempts: 0,
            config: RetryConfig {
                max_attempts: config.max_attempts.max(1),
                ..config.clone()
            },
        }
    }

    /// Attempts that have failed so far.
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Record a failed attempt and decide what happens next.
    pub fn on_failure(&mut self, error: &ClientError, policy: &dyn RetryPolicy) -> RetryDecision {
        self.attempts += 1;

        if !self.config.enabled
            || self.attempts >= self.config.max_attempts
            || !policy.is_retryable(error)
        {
            return RetryDecision::GiveUp;
        }

        RetryDecision::RetryAfter(self.config.delay_for_attempt(self.attempts - 1))
    }
}
