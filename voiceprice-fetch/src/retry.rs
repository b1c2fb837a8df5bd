//! Retry policy for backend calls.
//!
//! The backend sleeps when idle, so the first attempt uses a short timeout to
//! fail fast, later attempts a longer one to ride out a cold start.

use std::time::Duration;

/// Policy for retrying one logical call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Timeout of the first attempt.
    pub first_attempt_timeout: Duration,
    /// Timeout of every later attempt.
    pub retry_timeout: Duration,
    /// Pause after a first-attempt timeout, instead of backoff.
    pub cold_start_pause: Duration,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// Whether to use exponential backoff (linear otherwise).
    pub exponential_backoff: bool,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with default timings and the given attempt count.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            first_attempt_timeout: Duration::from_secs(8),
            retry_timeout: Duration::from_secs(15),
            cold_start_pause: Duration::from_millis(500),
            base_delay: Duration::from_secs(1),
            exponential_backoff: true,
            max_delay: Duration::from_secs(4),
        }
    }

    /// Disables retries; the single attempt gets the given timeout.
    pub fn single_attempt(timeout: Duration) -> Self {
        Self {
            max_attempts: 1,
            first_attempt_timeout: timeout,
            retry_timeout: timeout,
            cold_start_pause: Duration::ZERO,
            base_delay: Duration::ZERO,
            exponential_backoff: false,
            max_delay: Duration::ZERO,
        }
    }

    /// Sets the per-attempt timeouts.
    pub fn with_timeouts(mut self, first: Duration, retry: Duration) -> Self {
        self.first_attempt_timeout = first;
        self.retry_timeout = retry;
        self
    }

    /// Sets the pause used after a first-attempt timeout.
    pub fn with_cold_start_pause(mut self, pause: Duration) -> Self {
        self.cold_start_pause = pause;
        self
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the delay cap.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enables or disables exponential backoff.
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Returns the effective attempt count (never zero).
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Returns the timeout for a given attempt (1-based).
    pub fn timeout_for_attempt(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            self.first_attempt_timeout
        } else {
            self.retry_timeout
        }
    }

    /// Calculates the backoff after a failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        let delay = if self.exponential_backoff {
            self.base_delay
                .saturating_mul(2u32.saturating_pow(attempt - 1))
        } else {
            self.base_delay.saturating_mul(attempt)
        };

        delay.min(self.max_delay)
    }

    /// Returns the pause after a failed attempt.
    ///
    /// A timeout on the first attempt means the backend is probably waking
    /// up: retry after the short fixed pause instead of backing off.
    pub fn pause_after(&self, attempt: u32, timed_out: bool) -> Duration {
        if attempt == 1 && timed_out {
            self.cold_start_pause
        } else {
            self.delay_for_attempt(attempt)
        }
    }

    /// Upper bound on the wall time of one logical call.
    ///
    /// Sum of every attempt's timeout plus the longest possible pause
    /// between consecutive attempts.
    pub fn max_total_duration(&self) -> Duration {
        let attempts = self.attempts();
        let timeouts = (1..=attempts)
            .map(|a| self.timeout_for_attempt(a))
            .fold(Duration::ZERO, Duration::saturating_add);
        let pauses = (1..attempts)
            .map(|a| self.pause_after(a, true).max(self.pause_after(a, false)))
            .fold(Duration::ZERO, Duration::saturating_add);
        timeouts.saturating_add(pauses)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
