//! Response envelope decoding.
//!
//! Different backend controllers wrap their payloads differently: some
//! return a bare array, some `{ "data": [...] }`, the auth service
//! `{ "data": { "users": [...] } }`. Every shape is unwrapped here and
//! nowhere else.

use serde::de::DeserializeOwned;
use serde_json::Value;
use smartcity_common::{AppError, AppResult};

/// Object members that may hold a collection, in lookup order.
const LIST_KEYS: [&str; 3] = ["data", "users", "items"];

/// Maximum wrapping depth accepted before giving up.
const MAX_DEPTH: usize = 4;

/// Decode a collection from any accepted envelope.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> AppResult<Vec<T>> {
    let items = unwrap_list(body, 0)?;
    serde_json::from_value(Value::Array(items)).map_err(AppError::from)
}

fn unwrap_list(body: Value, depth: usize) -> AppResult<Vec<Value>> {
    if depth > MAX_DEPTH {
        return Err(AppError::Decode("Collection nested too deeply".to_string()));
    }
    match body {
        Value::Array(items) => Ok(items),
        // A null or empty body means "no data", not an error.
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => {
            for key in LIST_KEYS {
                if let Some(inner) = map.remove(key) {
                    return unwrap_list(inner, depth + 1);
                }
            }
            Err(AppError::Decode(format!(
                "Expected a collection, got an object with keys [{}]",
                map.keys().cloned().collect::<Vec<_>>().join(", ")
            )))
        }
        other => Err(AppError::Decode(format!(
            "Expected a collection, got {}",
            kind(&other)
        ))),
    }
}

/// Decode a single record, bare or under `data`, optionally nested under `inner_key`.
pub fn decode_record<T: DeserializeOwned>(body: Value, inner_key: Option<&str>) -> AppResult<T> {
    let mut value = match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    };
    if let Some(key) = inner_key {
        value = match value {
            Value::Object(mut map) => map
                .remove(key)
                .ok_or_else(|| AppError::Decode(format!("Missing `{key}` in response")))?,
            other => {
                return Err(AppError::Decode(format!(
                    "Expected an object holding `{key}`, got {}",
                    kind(&other)
                )));
            }
        };
    }
    serde_json::from_value(value).map_err(AppError::from)
}

/// Pull the backend's explanation out of an error body.
///
/// Looks at `message`, then `title` (problem details), then `error.message`.
/// A plain-text body is used as-is.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };
    let candidates = [
        value.get("message"),
        value.get("title"),
        value.get("error").and_then(|e| e.get("message")),
        value.get("error"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(ToString::to_string)
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
