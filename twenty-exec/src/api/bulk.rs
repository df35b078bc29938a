use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::objects::{object_endpoint, record_endpoint};
use crate::api::{ApiRequest, TwentyClient, TwentyError};

/// Items in flight at once. Each window settles before the next starts.
pub const BULK_CONCURRENCY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOperation {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkItemResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Map<String, Value>>,
}

impl BulkItemResult {
    fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            item: None,
        }
    }

    fn failed(error: impl Into<String>, item: Map<String, Value>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            item: Some(item),
        }
    }
}

impl TwentyClient {
    /// Applies `operation` to every item. Failures are reported per item;
    /// the output lines up with `items`.
    pub async fn bulk(
        &self,
        operation: BulkOperation,
        object: &str,
        items: Vec<Map<String, Value>>,
    ) -> Vec<BulkItemResult> {
        let mut results = Vec::with_capacity(items.len());
        for (window, chunk) in items.chunks(BULK_CONCURRENCY).enumerate() {
            tracing::debug!(?operation, object, window, size = chunk.len(), "bulk window");
            let pending = chunk
                .iter()
                .map(|item| self.bulk_item(operation, object, item.clone()));
            results.extend(join_all(pending).await);
        }

        let failed = results.iter().filter(|r| !r.success).count();
        tracing::info!(?operation, object, total = results.len(), failed, "bulk finished");
        results
    }

    async fn bulk_item(
        &self,
        operation: BulkOperation,
        object: &str,
        item: Map<String, Value>,
    ) -> BulkItemResult {
        let outcome = match operation {
            BulkOperation::Create => {
                let req = ApiRequest::post(object_endpoint(object)).body(item.clone());
                self.request(req).await
            }
            BulkOperation::Update => match item_id(&item) {
                Some(id) => {
                    let mut body = item.clone();
                    body.remove("id");
                    self.request(ApiRequest::put(record_endpoint(object, id)).body(body)).await
                }
                None => Err(missing_id()),
            },
            BulkOperation::Delete => match item_id(&item) {
                Some(id) => self.request(ApiRequest::delete(record_endpoint(object, id))).await,
                None => Err(missing_id()),
            },
        };

        match outcome {
            Ok(data) => BulkItemResult::ok(data),
            Err(e) => BulkItemResult::failed(e.to_string(), item),
        }
    }
}

fn item_id(item: &Map<String, Value>) -> Option<&str> {
    item.get("id").and_then(Value::as_str).filter(|id| !id.is_empty())
}

fn missing_id() -> TwentyError {
    TwentyError::InvalidInput("item is missing a string \"id\" field".to_string())
}

/// Parses a JSON array of objects.
pub fn parse_bulk_items(input: &str) -> Result<Vec<Map<String, Value>>, TwentyError> {
    let invalid = || TwentyError::InvalidInput("Invalid JSON format for bulk items".to_string());

    let value: Value = serde_json::from_str(input).map_err(|_| invalid())?;
    let Value::Array(values) = value else {
        return Err(invalid());
    };
    values
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => Ok(map),
            _ => Err(invalid()),
        })
        .collect()
}

/// Like [`parse_bulk_items`], but every item needs an `id`.
pub fn parse_bulk_update_items(input: &str) -> Result<Vec<Map<String, Value>>, TwentyError> {
    let items = parse_bulk_items(input)?;
    if items.iter().any(|item| item_id(item).is_none()) {
        return Err(TwentyError::InvalidInput(
            "Each item must have an \"id\" field for update".to_string(),
        ));
    }
    Ok(items)
}

/// Comma-separated ids; blanks are dropped.
pub fn parse_bulk_ids(input: &str) -> Result<Vec<String>, TwentyError> {
    let ids: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(TwentyError::InvalidInput(
            "At least one ID must be provided".to_string(),
        ));
    }
    Ok(ids)
}
