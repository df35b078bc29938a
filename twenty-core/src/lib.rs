#![forbid(unsafe_code)]

//! Retry policy engine for Twenty CRM API calls.
//!
//! Everything here is transport-agnostic: failures are normalized into
//! [`retry::AttemptError`] and the engine decides whether, and when, to try again.

pub mod retry;

pub use crate::retry::{
    execute_with_retry, AttemptError, AttemptFailure, RetryConfig, RetryDecision, RetryError,
    Retrier,
};
