mod attempt;
mod backoff;
mod classify;
mod config;
mod context;
mod decision;
mod headers;
mod run;

pub use attempt::{AttemptError, AttemptFailure};
pub use backoff::{compute_backoff_delay, compute_backoff_delay_with};
pub use classify::{
    is_retryable, NON_RETRYABLE_STATUS_CODES, RETRYABLE_ERROR_CODES, RETRYABLE_STATUS_CODES,
};
pub use config::{RetryConfig, RetryConfigError};
pub use context::describe_context;
pub use decision::{decide_retry, RetryDecision, RetryReason};
pub use headers::extract_retry_after;
pub use run::{execute_with_retry, RetryError, RetryState, Retrier, Sleeper, TokioSleeper};
