//! Exponential backoff for push delivery.
//!
//! Each queued message carries its own [`RetryState`]; backoff applied to
//! one message never affects another. The delay doubles on every transient
//! failure starting from a 1 ms seed (so the observed waits are 2 ms, 4 ms,
//! 8 ms, ...), and once a doubled delay would exceed the 10 000 ms ceiling
//! the message is dropped instead of retried.

use std::time::Duration;

/// Configuration for exponential backoff between send attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Seed delay. The first wait is this value doubled.
    pub initial_delay: Duration,

    /// The ceiling: a doubled delay exceeding this drops the message.
    pub max_delay: Duration,

    /// Multiplier applied to the pending delay on each failure.
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Default configuration for push delivery.
    ///
    /// - 1 ms seed, doubling: waits of 2 ms, 4 ms, ..., 8192 ms
    /// - 10 s ceiling, reached after 14 failed attempts (13 waited retries)
    pub const DEFAULT: Self = Self {
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(10_000),
        backoff_multiplier: 2.0,
    };

    /// Creates a new retry configuration.
    pub fn new(initial_delay: Duration, max_delay: Duration, backoff_multiplier: f64) -> Self {
        Self {
            initial_delay,
            max_delay,
            backoff_multiplier,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Per-message retry bookkeeping.
///
/// Created fresh when a message is enqueued, advanced by the drain loop on
/// each failed send attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryState {
    /// Failed send attempts so far.
    attempts: u32,

    /// The delay that would precede the next attempt, before doubling.
    next_delay: Duration,
}

impl RetryState {
    /// Creates the initial state for a freshly enqueued message.
    pub fn new(config: &RetryConfig) -> Self {
        RetryState {
            attempts: 0,
            next_delay: config.initial_delay,
        }
    }

    /// Returns the number of failed send attempts recorded so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Records a failed send attempt, doubling the pending delay.
    ///
    /// Returns the delay to wait before retrying, or `None` when the
    /// doubled delay exceeds the ceiling and the message must be dropped.
    pub fn record_failure(&mut self, config: &RetryConfig) -> Option<Duration> {
        self.attempts += 1;

        let doubled =
            Duration::from_secs_f64(self.next_delay.as_secs_f64() * config.backoff_multiplier);
        if doubled > config.max_delay {
            return None;
        }

        self.next_delay = doubled;
        Some(doubled)
    }
}
