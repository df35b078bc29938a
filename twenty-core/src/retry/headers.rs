use std::time::{Duration, SystemTime};

use httpdate::parse_http_date;

use crate::retry::attempt::AttemptError;

/// Server-requested wait from a `Retry-After` header, if any.
///
/// Accepts delta-seconds or an HTTP-date; dates in the past yield zero.
pub fn extract_retry_after(error: &AttemptError, now: SystemTime) -> Option<Duration> {
    let value = error.header("retry-after")?.trim();

    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }

    let target = parse_http_date(value).ok()?;
    Some(target.duration_since(now).unwrap_or(Duration::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_seconds_are_ignored() {
        let e = AttemptError::from_status(429).with_header("retry-after", "-5");
        assert_eq!(extract_retry_after(&e, SystemTime::now()), None);
    }

    #[test]
    fn garbage_is_ignored() {
        let e = AttemptError::from_status(429).with_header("retry-after", "soon");
        assert_eq!(extract_retry_after(&e, SystemTime::now()), None);
    }

    #[test]
    fn past_date_is_zero() {
        let now = SystemTime::now();
        let past = httpdate::fmt_http_date(now - Duration::from_secs(120));
        let e = AttemptError::from_status(503).with_header("Retry-After", past);
        assert_eq!(extract_retry_after(&e, now), Some(Duration::ZERO));
    }
}
