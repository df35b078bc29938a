#[derive(Debug, Clone, thiserror::Error)]
pub enum CredentialsError {
    #[error("missing {0} environment variable")]
    Missing(String),
    #[error("{0} is set but empty")]
    Empty(String),
    #[error("invalid API URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("credentials provider error: {0}")]
    Provider(String),
}

impl CredentialsError {
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}
