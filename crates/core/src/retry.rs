//! Retry policy for fallible network operations
//!
//! The policy only answers "how many attempts" and "how long to wait before
//! attempt n". The shell runs the loop.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// How the delay grows between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backoff {
    #[default]
    Fixed,
    Exponential,
}

impl FromStr for Backoff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Backoff::Fixed),
            "exponential" | "exp" => Ok(Backoff::Exponential),
            other => Err(format!(
                "Invalid backoff: {other}. Valid values: fixed, exponential"
            )),
        }
    }
}

impl fmt::Display for Backoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backoff::Fixed => write!(f, "fixed"),
            Backoff::Exponential => write!(f, "exponential"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            backoff: Backoff::Fixed,
        }
    }
}

impl RetryPolicy {
    /// Build a policy. `max_attempts` is clamped to at least one attempt.
    pub fn new(max_attempts: u32, delay: Duration, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.delay
    }

    pub fn backoff(&self) -> Backoff {
        self.backoff
    }

    /// Wait before `attempt` (1-based). There is no wait before the first one.
    pub fn delay_before(&self, attempt: u32) -> Option<Duration> {
        if attempt <= 1 || attempt > self.max_attempts {
            return None;
        }
        match self.backoff {
            Backoff::Fixed => Some(self.delay),
            Backoff::Exponential => {
                let factor = 2u32.saturating_pow(attempt - 2);
                Some(self.delay.saturating_mul(factor))
            }
        }
    }

    pub fn attempts_left(&self, attempt: u32) -> u32 {
        self.max_attempts.saturating_sub(attempt)
    }
}
