use serde_json::{Map, Value};

/// `/rest/{object}` for an API plural name such as `companies`.
pub fn object_endpoint(object: &str) -> String {
    format!("/rest/{}", object.trim_matches('/'))
}

pub fn record_endpoint(object: &str, id: &str) -> String {
    format!("{}/{}", object_endpoint(object), urlencoding::encode(id))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Drops null and empty-string fields. `0` and `false` are kept.
pub fn clean_object(obj: &Map<String, Value>) -> Map<String, Value> {
    obj.iter()
        .filter(|(_, v)| !is_blank(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Same filtering as [`clean_object`], rendered as query pairs.
/// Strings go out verbatim; everything else as compact JSON.
pub fn build_filter_query(filters: &Map<String, Value>) -> Vec<(String, String)> {
    filters
        .iter()
        .filter(|(_, v)| !is_blank(v))
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), rendered)
        })
        .collect()
}

/// Pulls the record list out of a response.
///
/// Accepts a bare array, `{"data": [...]}`, or the nested
/// `{"data": {"<objects>": [...]}}` shape. Anything else is treated as a
/// single record.
pub fn extract_records(response: Value) -> Vec<Value> {
    match take_data(response) {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_array) => {
            match map.into_iter().next() {
                Some((_, Value::Array(items))) => items,
                _ => Vec::new(),
            }
        }
        other => vec![other],
    }
}

/// Unwraps `{"data": ...}` if present. Single-record responses may come back
/// as `{"data": {"createCompany": {...}}}`; that inner record is returned.
pub(crate) fn unwrap_record(response: Value) -> Value {
    match take_data(response) {
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_object) => map
            .into_iter()
            .next()
            .map(|(_, record)| record)
            .unwrap_or(Value::Null),
        other => other,
    }
}

fn take_data(response: Value) -> Value {
    match response {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
