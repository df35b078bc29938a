use async_trait::async_trait;

use crate::credentials::{Credentials, CredentialsError, DEFAULT_API_URL};

#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    async fn credentials(&self) -> Result<Credentials, CredentialsError>;
}

#[derive(Debug, Clone)]
pub struct StaticCredentialsProvider {
    credentials: Credentials,
}

impl StaticCredentialsProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn credentials(&self) -> Result<Credentials, CredentialsError> {
        Ok(self.credentials.clone())
    }
}

/// Reads `TWENTY_API_URL` / `TWENTY_API_KEY`.
#[derive(Debug, Clone, Default)]
pub struct EnvCredentialsProvider {
    /// Optional prefix to apply to env var lookups, e.g. `STAGING_`.
    pub env_prefix: Option<String>,
}

impl EnvCredentialsProvider {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            env_prefix: Some(prefix.into()),
        }
    }

    fn key(&self, name: &str) -> String {
        match &self.env_prefix {
            None => name.to_string(),
            Some(p) => format!("{p}{name}"),
        }
    }

    pub fn load(&self) -> Result<Credentials, CredentialsError> {
        let url_var = self.key("TWENTY_API_URL");
        let key_var = self.key("TWENTY_API_KEY");

        let url = match std::env::var(&url_var) {
            Ok(v) if v.trim().is_empty() => return Err(CredentialsError::Empty(url_var)),
            Ok(v) => v,
            Err(std::env::VarError::NotPresent) => DEFAULT_API_URL.to_string(),
            Err(e) => return Err(CredentialsError::Provider(format!("{url_var}: {e}"))),
        };
        let key = match std::env::var(&key_var) {
            Ok(v) if v.trim().is_empty() => return Err(CredentialsError::Empty(key_var)),
            Ok(v) => v,
            Err(std::env::VarError::NotPresent) => return Err(CredentialsError::Missing(key_var)),
            Err(e) => return Err(CredentialsError::Provider(format!("{key_var}: {e}"))),
        };

        Ok(Credentials::new(url, key))
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn credentials(&self) -> Result<Credentials, CredentialsError> {
        self.load()
    }
}
