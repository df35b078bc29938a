use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry budget and backoff shape for one call site.
///
/// Values are plain milliseconds so the struct can be loaded from a config
/// file section; missing fields fall back to [`RetryConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the initial attempt; total attempts = `max_retries + 1`.
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetryConfigError {
    #[error("base_delay_ms must be positive")]
    ZeroBaseDelay,
    #[error("max_delay_ms ({max}) must be >= base_delay_ms ({base})")]
    MaxBelowBase { base: u64, max: u64 },
    #[error("backoff_multiplier must be a finite number > 1 (got {0})")]
    Multiplier(f64),
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), RetryConfigError> {
        if self.base_delay_ms == 0 {
            return Err(RetryConfigError::ZeroBaseDelay);
        }
        if self.max_delay_ms < self.base_delay_ms {
            return Err(RetryConfigError::MaxBelowBase {
                base: self.base_delay_ms,
                max: self.max_delay_ms,
            });
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier <= 1.0 {
            return Err(RetryConfigError::Multiplier(self.backoff_multiplier));
        }
        Ok(())
    }

    pub fn max_attempts(&self) -> usize {
        self.max_retries.saturating_add(1)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}
