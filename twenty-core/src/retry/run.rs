//! Retry loop: run an async operation until success or the policy says stop.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;

use crate::retry::attempt::{AttemptError, AttemptFailure};
use crate::retry::config::RetryConfig;
use crate::retry::context::describe_context;
use crate::retry::decision::{decide_retry, RetryDecision};

/// Suspends the calling task between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Where a retry sequence stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    /// About to run the attempt with this 0-based index.
    Attempting(usize),
    Succeeded,
    Failed,
}

impl RetryState {
    pub fn after_success(self) -> Self {
        match self {
            Self::Attempting(_) => Self::Succeeded,
            terminal => terminal,
        }
    }

    pub fn after_failure(self, decision: &RetryDecision) -> Self {
        match (self, decision.should_retry()) {
            (Self::Attempting(n), true) => Self::Attempting(n + 1),
            (Self::Attempting(_), false) => Self::Failed,
            (terminal, _) => terminal,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Attempting(_))
    }
}

/// Final failure after the retry budget is spent or the error is not retryable.
///
/// Displays as the context sentence followed by the original message.
#[derive(Debug, thiserror::Error)]
#[error("{context}{message}")]
pub struct RetryError<E> {
    /// Total attempts made, including the first.
    pub attempts: usize,
    pub context: String,
    pub message: String,
    pub last_error: E,
}

impl<E: AttemptFailure> RetryError<E> {
    fn new(last_error: E, view: &AttemptError, attempt_index: usize) -> Self {
        Self {
            attempts: attempt_index + 1,
            context: describe_context(view, attempt_index),
            message: last_error.to_string(),
            last_error,
        }
    }
}

impl<E> RetryError<E> {
    pub fn into_inner(self) -> E {
        self.last_error
    }
}

#[derive(Clone)]
pub struct Retrier {
    config: RetryConfig,
    sleeper: Arc<dyn Sleeper>,
    jitter: fn() -> f64,
}

impl std::fmt::Debug for Retrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retrier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Retrier {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl Retrier {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            sleeper: Arc::new(TokioSleeper),
            jitter: fastrand::f64,
        }
    }

    pub fn with_sleeper<S: Sleeper + 'static>(mut self, sleeper: S) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn with_shared_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Overrides the uniform `[0, 1]` source used for backoff jitter.
    pub fn with_jitter(mut self, jitter: fn() -> f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: AttemptFailure,
    {
        let mut state = RetryState::Attempting(0);
        while let RetryState::Attempting(attempt) = state {
            let err = match operation().await {
                Ok(value) => {
                    state = state.after_success();
                    tracing::trace!(attempts = attempt + 1, ?state, "operation succeeded");
                    return Ok(value);
                }
                Err(err) => err,
            };

            let view = err.attempt_error();
            let decision =
                decide_retry(&self.config, &view, attempt, SystemTime::now(), self.jitter);

            state = state.after_failure(&decision);
            if state.is_terminal() {
                tracing::debug!(
                    attempts = attempt + 1,
                    reason = ?decision.reason(),
                    error = %err,
                    "giving up"
                );
                return Err(RetryError::new(err, &view, attempt));
            }

            let delay = decision.delay();
            tracing::warn!(
                attempt = attempt + 1,
                max_attempts = self.config.max_attempts(),
                delay_ms = delay.as_millis() as u64,
                reason = ?decision.reason(),
                status = ?view.status,
                code = ?view.code,
                error = %err,
                "request failed, retrying"
            );
            self.sleeper.sleep(delay).await;
        }
        unreachable!("retry loop only exits through success or a terminal failure")
    }
}

/// Runs `operation` under `config` with the default tokio sleeper.
pub async fn execute_with_retry<T, E, F, Fut>(
    config: &RetryConfig,
    operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: AttemptFailure,
{
    Retrier::new(config.clone()).run(operation).await
}
