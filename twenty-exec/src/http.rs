use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpRequestParts {
    pub method: String,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct HttpResponseParts {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponseParts {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("request timeout")]
    Timeout,
    #[error("network error: {message}")]
    Network {
        /// errno-style code (`ECONNREFUSED`, `ENOTFOUND`, ...) when one could be derived.
        code: Option<String>,
        message: String,
    },
    #[error("http error: {0}")]
    Other(String),
}

impl HttpError {
    pub fn code(&self) -> Option<&str> {
        match self {
            HttpError::Timeout => Some("ETIMEDOUT"),
            HttpError::Network { code, .. } => code.as_deref(),
            HttpError::Other(_) => None,
        }
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("twenty-exec/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
    ) -> Result<HttpResponseParts, HttpError> {
        let method: reqwest::Method = req.method.parse().map_err(
            |e: <reqwest::Method as std::str::FromStr>::Err| HttpError::Other(e.to_string()),
        )?;
        let mut rb = self.client.request(method, req.url).timeout(timeout);

        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }
        if !req.body.is_empty() {
            rb = rb.body(req.body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        let body = resp.bytes().await.map_err(map_reqwest_error)?.to_vec();

        Ok(HttpResponseParts { status, headers, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    let code = network_code(&e);
    if code.is_some() || e.is_connect() || e.is_request() {
        return HttpError::Network {
            code: code.map(str::to_string),
            message: e.to_string(),
        };
    }
    HttpError::Other(e.to_string())
}

/// Walks the source chain looking for something that maps onto a
/// well-known errno-style code.
fn network_code(e: &(dyn std::error::Error + 'static)) -> Option<&'static str> {
    let mut current = Some(e);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if let Some(code) = io_error_code(io.kind()) {
                return Some(code);
            }
        }
        let text = err.to_string().to_lowercase();
        if text.contains("temporary failure in name resolution") {
            return Some("EAI_AGAIN");
        }
        if text.contains("dns error") || text.contains("failed to lookup address") {
            return Some("ENOTFOUND");
        }
        current = err.source();
    }
    None
}

fn io_error_code(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::ConnectionRefused => Some("ECONNREFUSED"),
        ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted => Some("ECONNRESET"),
        ErrorKind::BrokenPipe => Some("EPIPE"),
        ErrorKind::TimedOut => Some("ETIMEDOUT"),
        _ => None,
    }
}
