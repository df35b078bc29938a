use serde_json::{Map, Value};

/// Reads a JSON argument given inline or as `@path`.
pub fn read_json_arg(raw: &str) -> Result<String, String> {
    match raw.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).map_err(|e| format!("failed to read {path}: {e}"))
        }
        None => Ok(raw.to_string()),
    }
}

/// Parses a JSON object argument (`{...}` or `@file`).
pub fn parse_object_arg(raw: &str) -> Result<Map<String, Value>, String> {
    let text = read_json_arg(raw)?;
    match serde_json::from_str(&text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

/// `KEY=VALUE` pairs; values that parse as JSON keep their type.
pub fn parse_filters(pairs: &[String]) -> Result<Map<String, Value>, String> {
    let mut map = Map::new();
    for pair in pairs {
        let Some((k, v)) = pair.split_once('=') else {
            return Err(format!("expected KEY=VALUE, got {pair:?}"));
        };
        let value = serde_json::from_str(v).unwrap_or_else(|_| Value::String(v.to_string()));
        map.insert(k.to_string(), value);
    }
    Ok(map)
}
