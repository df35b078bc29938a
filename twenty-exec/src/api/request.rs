use std::collections::BTreeMap;

use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::TwentyError;
use crate::credentials::{Credentials, CredentialsError};
use crate::http::HttpRequestParts;

/// One REST call, before credentials are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base, e.g. `/rest/companies`.
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Map<String, Value>>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn queries<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Resolves the full URL and headers. Empty bodies and empty query
    /// strings are left off the wire.
    pub fn build(&self, credentials: &Credentials) -> Result<HttpRequestParts, TwentyError> {
        let raw = format!("{}{}", credentials.base_url(), self.endpoint);
        let mut url =
            url::Url::parse(&raw).map_err(|e| CredentialsError::invalid_url(&raw, e.to_string()))?;

        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), credentials.authorization());
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let body = match &self.body {
            Some(map) if !map.is_empty() => serde_json::to_vec(map).map_err(|e| {
                TwentyError::InvalidInput(format!("failed to encode request body: {e}"))
            })?,
            _ => Vec::new(),
        };

        Ok(HttpRequestParts {
            method: self.method.as_str().to_string(),
            url,
            headers,
            body,
        })
    }
}
