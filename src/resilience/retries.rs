//! Retry policy.
//!
//! # Responsibilities
//! - Bound the number of attempts for one logical operation
//! - Hold the fixed pause taken between attempts
//! - Suspend the calling task (never spin) while waiting, aborting early on
//!   cancellation
//!
//! # Design Decisions
//! - Fixed interval, no exponential backoff or jitter
//! - Attempts are numbered from 1; attempt `max_attempts` is the last one

use std::time::Duration;

use crate::lifecycle::cancel::CancelToken;

/// Fixed-interval retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Policy with a fixed pause between attempts.
    pub const fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Policy that retries straight away.
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::fixed(max_attempts, Duration::ZERO)
    }

    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether another attempt may follow `attempt`.
    pub const fn allows_another(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Sleep for the configured delay.
    ///
    /// Returns `false` if the token fired before or during the pause.
    pub async fn pause(&self, cancel: Option<&CancelToken>) -> bool {
        let Some(token) = cancel else {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            return true;
        };
        if token.is_cancelled() {
            return false;
        }
        if self.delay.is_zero() {
            return true;
        }
        let mut watcher = token.clone();
        let slept = tokio::select! {
            _ = tokio::time::sleep(self.delay) => true,
            _ = watcher.cancelled() => false,
        };
        slept && !token.is_cancelled()
    }
}
