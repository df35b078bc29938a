use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use twenty_core::{RetryConfig, Retrier};

use crate::api::objects::{
    build_filter_query, clean_object, extract_records, object_endpoint, record_endpoint,
    unwrap_record,
};
use crate::api::{ApiError, ApiRequest, TwentyError};
use crate::credentials::CredentialsProvider;
use crate::http::{HttpClient, HttpRequestParts};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Twenty CRM REST client. Every request runs under the configured retry
/// policy.
#[derive(Clone)]
pub struct TwentyClient {
    http: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialsProvider>,
    retrier: Retrier,
    timeout: Duration,
}

impl std::fmt::Debug for TwentyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwentyClient")
            .field("retrier", &self.retrier)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl TwentyClient {
    pub fn new(http: Arc<dyn HttpClient>, credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self {
            http,
            credentials,
            retrier: Retrier::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_retrier(mut self, retrier: Retrier) -> Self {
        self.retrier = retrier;
        self
    }

    pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
        self.retrier = Retrier::new(config);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        self.retrier.config()
    }

    /// Sends `request` with retries and decodes the JSON response.
    /// An empty body decodes to `Value::Null`.
    pub async fn request(&self, request: ApiRequest) -> Result<Value, TwentyError> {
        let credentials = self.credentials.credentials().await?;
        let parts = request.build(&credentials)?;

        tracing::debug!(method = %parts.method, url = %parts.url, "twenty request");

        let body = self.retrier.run(|| self.send_once(parts.clone())).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| TwentyError::Decode(e.to_string()))
    }

    async fn send_once(&self, parts: HttpRequestParts) -> Result<Vec<u8>, ApiError> {
        let resp = self.http.send(parts, self.timeout).await?;
        if resp.is_success() {
            return Ok(resp.body);
        }
        Err(ApiError::Http {
            status: resp.status,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
            headers: resp.headers,
        })
    }

    /// One page of `object`, narrowed by `filters` (null and empty values dropped).
    pub async fn list(
        &self,
        object: &str,
        limit: Option<u32>,
        filters: &Map<String, Value>,
    ) -> Result<Vec<Value>, TwentyError> {
        let mut req = ApiRequest::get(object_endpoint(object)).queries(build_filter_query(filters));
        if let Some(limit) = limit {
            req = req.query("limit", limit);
        }
        Ok(extract_records(self.request(req).await?))
    }

    pub async fn get(&self, object: &str, id: &str) -> Result<Value, TwentyError> {
        let value = self.request(ApiRequest::get(record_endpoint(object, id))).await?;
        Ok(unwrap_record(value))
    }

    pub async fn create(
        &self,
        object: &str,
        body: &Map<String, Value>,
    ) -> Result<Value, TwentyError> {
        let req = ApiRequest::post(object_endpoint(object)).body(clean_object(body));
        Ok(unwrap_record(self.request(req).await?))
    }

    pub async fn update(
        &self,
        object: &str,
        id: &str,
        body: &Map<String, Value>,
    ) -> Result<Value, TwentyError> {
        let cleaned = clean_object(body);
        if cleaned.is_empty() {
            return Err(TwentyError::InvalidInput(
                "At least one field must be updated".to_string(),
            ));
        }
        let req = ApiRequest::put(record_endpoint(object, id)).body(cleaned);
        Ok(unwrap_record(self.request(req).await?))
    }

    pub async fn delete(&self, object: &str, id: &str) -> Result<Value, TwentyError> {
        self.request(ApiRequest::delete(record_endpoint(object, id))).await
    }

    /// Cheapest authenticated call the API offers.
    pub async fn verify_credentials(&self) -> Result<(), TwentyError> {
        let req = ApiRequest::get(object_endpoint("companies")).query("limit", 1);
        self.request(req).await.map(|_| ())
    }
}
