use std::time::Duration;

use crate::retry::config::RetryConfig;

const JITTER_RATIO: f64 = 0.25;

/// Exponential backoff with ±25% jitter, capped at `max_delay_ms`.
///
/// `attempt_index` is 0 for the first retry.
pub fn compute_backoff_delay(attempt_index: usize, cfg: &RetryConfig) -> Duration {
    compute_backoff_delay_with(attempt_index, cfg, fastrand::f64())
}

/// Same as [`compute_backoff_delay`] with the uniform draw supplied by the caller.
///
/// `unit_random` is expected in `[0, 1]`; 0 maps to -25%, 1 to +25%.
pub fn compute_backoff_delay_with(
    attempt_index: usize,
    cfg: &RetryConfig,
    unit_random: f64,
) -> Duration {
    let max_ms = cfg.max_delay_ms as f64;
    let exp = attempt_index.min(i32::MAX as usize) as i32;
    let raw = (cfg.base_delay_ms as f64) * cfg.backoff_multiplier.powi(exp);
    // powi overflows to inf long before the index gets large; anything past
    // the cap behaves the same once clamped.
    let exponential = if raw.is_finite() { raw.min(max_ms * 2.0) } else { max_ms * 2.0 };

    let unit = unit_random.clamp(0.0, 1.0);
    let jitter = exponential * JITTER_RATIO * (unit * 2.0 - 1.0);

    let delay = (exponential + jitter).clamp(0.0, max_ms);
    Duration::from_millis(delay.round() as u64)
}
