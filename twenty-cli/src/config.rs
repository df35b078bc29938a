use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use twenty_core::retry::{RetryConfig, RetryConfigError};
use twenty_exec::credentials::{
    CredentialsError, EnvCredentialsProvider, StaticCredentialsProvider,
};
use twenty_exec::{ReqwestHttpClient, TwentyClient};

use crate::{ApiArgs, RetryArgs};

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is neither valid JSON nor YAML", .path.display())]
    Parse { path: PathBuf },
    #[error("invalid retry settings: {0}")]
    Retry(#[from] RetryConfigError),
    #[error("timeout_ms must be positive")]
    ZeroTimeout,
    #[error(transparent)]
    Credentials(#[from] CredentialsError),
    #[error("failed to build HTTP client: {0}")]
    Http(String),
}

/// Contents of a `--config` file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retry: Option<RetryConfig>,
}

pub fn load_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if let Ok(v) = serde_json::from_str(&content) {
        return Ok(v);
    }
    if let Ok(v) = serde_yaml::from_str(&content) {
        return Ok(v);
    }
    Err(ConfigError::Parse {
        path: path.to_path_buf(),
    })
}

/// Settings after merging flags, config file and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `None` means "whatever TWENTY_API_URL or the default says".
    pub api_url: Option<String>,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

pub fn resolve(api: &ApiArgs) -> Result<Settings, ConfigError> {
    let file = match &api.config {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };

    let retry = apply_retry_flags(file.retry.unwrap_or_default(), &api.retry);
    retry.validate()?;

    let timeout_ms = api.timeout_ms.or(file.timeout_ms).unwrap_or(DEFAULT_TIMEOUT_MS);
    if timeout_ms == 0 {
        return Err(ConfigError::ZeroTimeout);
    }

    Ok(Settings {
        api_url: api.api_url.clone().or(file.api_url),
        timeout: Duration::from_millis(timeout_ms),
        retry,
    })
}

fn apply_retry_flags(mut retry: RetryConfig, flags: &RetryArgs) -> RetryConfig {
    if let Some(v) = flags.max_retries {
        retry.max_retries = v;
    }
    if let Some(v) = flags.base_delay_ms {
        retry.base_delay_ms = v;
    }
    if let Some(v) = flags.max_delay_ms {
        retry.max_delay_ms = v;
    }
    if let Some(v) = flags.backoff_multiplier {
        retry.backoff_multiplier = v;
    }
    retry
}

/// Resolves settings and credentials into a ready client.
pub fn build_client(api: &ApiArgs) -> Result<TwentyClient, ConfigError> {
    let settings = resolve(api)?;
    client_for(&settings)
}

pub fn client_for(settings: &Settings) -> Result<TwentyClient, ConfigError> {
    let mut credentials = EnvCredentialsProvider::default().load()?;
    if let Some(url) = &settings.api_url {
        credentials = credentials.with_api_url(url.clone());
    }
    tracing::debug!(api_url = credentials.base_url(), "resolved credentials");

    let http = ReqwestHttpClient::new().map_err(|e| ConfigError::Http(e.to_string()))?;
    Ok(TwentyClient::new(
        Arc::new(http),
        Arc::new(StaticCredentialsProvider::new(credentials)),
    )
    .with_retry_config(settings.retry.clone())
    .with_timeout(settings.timeout))
}
