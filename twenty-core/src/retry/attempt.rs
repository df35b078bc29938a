use std::collections::BTreeMap;
use std::fmt;

/// Normalized view of one failed attempt.
///
/// Every field is optional; the classifier treats missing data as
/// "nothing to go on" rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptError {
    pub status: Option<u16>,
    /// Network error code such as `ECONNRESET`.
    pub code: Option<String>,
    pub message: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl AttemptError {
    pub fn from_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.message, self.status, &self.code) {
            (Some(m), _, _) => f.write_str(m),
            (None, Some(s), _) => write!(f, "HTTP {s}"),
            (None, None, Some(c)) => f.write_str(c),
            (None, None, None) => f.write_str("unknown error"),
        }
    }
}

impl std::error::Error for AttemptError {}

/// A failure type the retry engine can inspect.
///
/// `Display` supplies the message carried into the final error.
pub trait AttemptFailure: fmt::Display {
    fn attempt_error(&self) -> AttemptError;
}

impl AttemptFailure for AttemptError {
    fn attempt_error(&self) -> AttemptError {
        self.clone()
    }
}
