use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_API_URL: &str = "https://api.twenty.com";

/// API base URL plus bearer token. The token never shows up in `Debug`.
#[derive(Clone)]
pub struct Credentials {
    api_url: String,
    api_key: Arc<SecretString>,
}

impl Credentials {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        Self {
            api_url: api_url.into(),
            api_key: Arc::new(SecretString::from(api_key)),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret().trim())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
