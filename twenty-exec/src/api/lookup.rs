use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::api::objects::{extract_records, object_endpoint};
use crate::api::{ApiRequest, TwentyClient, TwentyError};

pub const UPSERT_ACTION_FIELD: &str = "_upsertAction";

const FALLBACK_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertAction {
    Created,
    Updated,
}

impl UpsertAction {
    pub fn as_str(self) -> &'static str {
        match self {
            UpsertAction::Created => "created",
            UpsertAction::Updated => "updated",
        }
    }
}

impl TwentyClient {
    /// First record whose `field` equals `value`.
    ///
    /// Tries the API's `filter` parameter first. If the server rejects it,
    /// falls back to a free-text search and matches locally. Any failure on
    /// the fallback path reads as "not found".
    pub async fn find_record_by_field(
        &self,
        object: &str,
        field: &str,
        value: &str,
    ) -> Option<Value> {
        let mut condition = Map::new();
        condition.insert(field.to_string(), json!({ "eq": value }));
        let filter = Value::Object(condition).to_string();
        let req = ApiRequest::get(object_endpoint(object))
            .query("filter", filter)
            .query("limit", 1);

        match self.request(req).await {
            Ok(response) => take_data_array(response).and_then(|r| r.into_iter().next()),
            Err(e) => {
                tracing::debug!(
                    object,
                    field,
                    error = %e,
                    "filter lookup failed, falling back to search"
                );
                self.search_match(object, field, value).await
            }
        }
    }

    async fn search_match(&self, object: &str, field: &str, value: &str) -> Option<Value> {
        let req = ApiRequest::get(object_endpoint(object))
            .query("search", value)
            .query("limit", FALLBACK_SEARCH_LIMIT);

        let response = match self.request(req).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(object, field, error = %e, "search lookup failed");
                return None;
            }
        };

        take_data_array(response)?
            .into_iter()
            .find(|record| field_matches(record.get(field), value))
    }

    /// Updates the record matched by `field == value`, or creates one.
    /// The returned object carries `_upsertAction`.
    pub async fn upsert(
        &self,
        object: &str,
        field: &str,
        value: &str,
        body: &Map<String, Value>,
    ) -> Result<Value, TwentyError> {
        let existing = self.find_record_by_field(object, field, value).await;
        let existing_id = existing
            .as_ref()
            .and_then(|r| r.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let (result, action) = match existing_id {
            Some(id) => (self.update(object, &id, body).await?, UpsertAction::Updated),
            None => (self.create(object, body).await?, UpsertAction::Created),
        };

        tracing::info!(object, field, action = action.as_str(), "upsert");
        Ok(tag_action(result, action))
    }
}

/// Lookup responses only count when they hold a list of records.
fn take_data_array(response: Value) -> Option<Vec<Value>> {
    let is_list = match &response {
        Value::Array(_) => true,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(_)) => true,
            Some(Value::Object(inner)) => inner.len() == 1 && inner.values().all(Value::is_array),
            _ => false,
        },
        _ => false,
    };
    is_list.then(|| extract_records(response))
}

fn field_matches(candidate: Option<&Value>, value: &str) -> bool {
    match candidate {
        Some(Value::String(s)) => s.to_lowercase() == value.to_lowercase(),
        Some(other) => other.to_string() == value,
        None => false,
    }
}

fn tag_action(result: Value, action: UpsertAction) -> Value {
    let mut map = match result {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut m = Map::new();
            m.insert("data".to_string(), other);
            m
        }
    };
    map.insert(
        UPSERT_ACTION_FIELD.to_string(),
        Value::String(action.as_str().to_string()),
    );
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_fields_match_case_insensitively() {
        let v = json!("Acme@Example.com");
        assert!(field_matches(Some(&v), "acme@example.com"));
        assert!(!field_matches(Some(&v), "other@example.com"));
    }

    #[test]
    fn non_string_fields_match_by_text() {
        assert!(field_matches(Some(&json!(42)), "42"));
        assert!(field_matches(Some(&json!(true)), "true"));
        assert!(!field_matches(Some(&json!(42)), "42.0"));
    }

    #[test]
    fn tags_upsert_action() {
        let tagged = tag_action(json!({"id": "1"}), UpsertAction::Created);
        assert_eq!(tagged, json!({"id": "1", "_upsertAction": "created"}));
        let tagged = tag_action(Value::Null, UpsertAction::Updated);
        assert_eq!(tagged, json!({"_upsertAction": "updated"}));
    }

    #[test]
    fn only_lists_count_as_lookup_results() {
        assert!(take_data_array(json!({"id": 1})).is_none());
        assert_eq!(take_data_array(json!({"data": []})), Some(vec![]));
        assert_eq!(
            take_data_array(json!({"data": {"people": [{"id": 1}]}})),
            Some(vec![json!({"id": 1})])
        );
    }
}
