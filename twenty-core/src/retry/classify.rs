//! Retryability classification.

use crate::retry::attempt::AttemptError;

pub const RETRYABLE_STATUS_CODES: [u16; 5] = [408, 429, 502, 503, 504];

pub const NON_RETRYABLE_STATUS_CODES: [u16; 6] = [400, 401, 403, 404, 405, 422];

pub const RETRYABLE_ERROR_CODES: [&str; 6] = [
    "ECONNREFUSED",
    "ECONNRESET",
    "ETIMEDOUT",
    "ENOTFOUND",
    "EPIPE",
    "EAI_AGAIN",
];

const TRANSIENT_MESSAGE_HINTS: [&str; 4] = ["timeout", "econnrefused", "socket hang up", "network"];

/// Returns true when the failure looks transient.
///
/// Status codes win over network codes: a 404 that also carries `ECONNRESET`
/// is still a client error. Unknown shapes are not retried, except that a
/// message mentioning e.g. "network" is.
pub fn is_retryable(error: &AttemptError) -> bool {
    if let Some(status) = error.status {
        if NON_RETRYABLE_STATUS_CODES.contains(&status) {
            return false;
        }
        if RETRYABLE_STATUS_CODES.contains(&status) {
            return true;
        }
    }

    if let Some(code) = error.code.as_deref() {
        if RETRYABLE_ERROR_CODES.contains(&code) {
            return true;
        }
    }

    let message = error.message.as_deref().unwrap_or_default().to_lowercase();
    TRANSIENT_MESSAGE_HINTS.iter().any(|hint| message.contains(hint))
}
