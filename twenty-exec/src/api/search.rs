use futures_util::future::join_all;
use serde_json::Value;

use crate::api::objects::{extract_records, object_endpoint};
use crate::api::{ApiRequest, TwentyClient};

/// Field added to every search hit naming the object type it came from.
pub const OBJECT_TYPE_FIELD: &str = "_objectType";

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

impl TwentyClient {
    /// Searches each object type concurrently and concatenates the hits in
    /// `object_types` order. A type whose request fails contributes nothing.
    pub async fn search(&self, query: &str, object_types: &[String], limit: u32) -> Vec<Value> {
        let searches = object_types.iter().map(|object| async move {
            let req = ApiRequest::get(object_endpoint(object))
                .query("search", query)
                .query("limit", limit);
            match self.request(req).await {
                Ok(response) => tag_records(extract_records(response), object),
                Err(e) => {
                    tracing::warn!(object = %object, error = %e, "search failed for object type");
                    Vec::new()
                }
            }
        });

        join_all(searches).await.into_iter().flatten().collect()
    }
}

fn tag_records(records: Vec<Value>, object: &str) -> Vec<Value> {
    records
        .into_iter()
        .filter_map(|record| match record {
            Value::Object(mut map) => {
                map.insert(OBJECT_TYPE_FIELD.to_string(), Value::String(object.to_string()));
                Some(Value::Object(map))
            }
            _ => None,
        })
        .collect()
}
