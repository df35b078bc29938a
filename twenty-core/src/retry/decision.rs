use std::time::{Duration, SystemTime};

use crate::retry::attempt::AttemptError;
use crate::retry::backoff::compute_backoff_delay_with;
use crate::retry::classify::is_retryable;
use crate::retry::config::RetryConfig;
use crate::retry::headers::extract_retry_after;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    NotRetryable,
    AttemptsExhausted,
    RetryAfterHeader,
    Backoff,
}

impl RetryDecision {
    pub fn should_retry(&self) -> bool {
        matches!(self, Self::RetryAfter { .. })
    }

    /// Wait before the next attempt; zero when stopping.
    pub fn delay(&self) -> Duration {
        match self {
            Self::RetryAfter { delay, .. } => *delay,
            Self::Stop { .. } => Duration::ZERO,
        }
    }

    pub fn reason(&self) -> RetryReason {
        match self {
            Self::RetryAfter { reason, .. } | Self::Stop { reason } => *reason,
        }
    }
}

/// Decide if we should retry and how long to wait.
///
/// - `attempt_index`: 0-based index of the attempt that just failed.
/// - `now`: time source for HTTP-date `Retry-After` values.
/// - `unit_random`: uniform draw in `[0, 1]` used for backoff jitter.
pub fn decide_retry(
    cfg: &RetryConfig,
    error: &AttemptError,
    attempt_index: usize,
    now: SystemTime,
    unit_random: impl FnOnce() -> f64,
) -> RetryDecision {
    if !is_retryable(error) {
        return RetryDecision::Stop {
            reason: RetryReason::NotRetryable,
        };
    }

    if attempt_index >= cfg.max_retries {
        return RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted,
        };
    }

    // Retry-After header wins.
    if let Some(delay) = extract_retry_after(error, now) {
        return RetryDecision::RetryAfter {
            delay,
            reason: RetryReason::RetryAfterHeader,
        };
    }

    RetryDecision::RetryAfter {
        delay: compute_backoff_delay_with(attempt_index, cfg, unit_random()),
        reason: RetryReason::Backoff,
    }
}
