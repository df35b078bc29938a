use std::collections::BTreeMap;

use twenty_core::{AttemptError, AttemptFailure, RetryError};

use crate::credentials::CredentialsError;
use crate::http::HttpError;

/// Failure of a single attempt, as seen by the retry loop.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Twenty CRM API error: HTTP {status}: {body}")]
    Http {
        status: u16,
        headers: BTreeMap<String, String>,
        body: String,
    },
    #[error("Twenty CRM API error: {0}")]
    Transport(#[from] HttpError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }
}

impl AttemptFailure for ApiError {
    fn attempt_error(&self) -> AttemptError {
        match self {
            ApiError::Http {
                status, headers, ..
            } => AttemptError {
                status: Some(*status),
                code: None,
                message: Some(self.to_string()),
                headers: headers.clone(),
            },
            ApiError::Transport(e) => AttemptError {
                status: None,
                code: e.code().map(str::to_string),
                message: Some(transport_message(e)),
                headers: BTreeMap::new(),
            },
        }
    }
}

/// Transport text without the display prefix. The classifier matches
/// keywords against it.
fn transport_message(e: &HttpError) -> String {
    match e {
        HttpError::Timeout => "request timeout".to_string(),
        HttpError::Network { message, .. } => message.clone(),
        HttpError::Other(message) => message.clone(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TwentyError {
    #[error(transparent)]
    Request(#[from] RetryError<ApiError>),
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl TwentyError {
    /// HTTP status of the final attempt, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TwentyError::Request(e) => e.last_error.status(),
            _ => None,
        }
    }

    pub fn attempts(&self) -> Option<usize> {
        match self {
            TwentyError::Request(e) => Some(e.attempts),
            _ => None,
        }
    }
}
