//! The one place where backend replies are normalized.
//!
//! The backend answers either with an envelope (`{ "success": true, "data": .., "message": .. }`)
//! or with the bare payload. Both are accepted here so no caller has to guess.

use crate::error::BackendError;
use serde::de::DeserializeOwned;
use serde_json::Value;

const DATA_KEY: &str = "data";
const MESSAGE_KEY: &str = "message";
const ERROR_KEY: &str = "error";

/// A decoded payload together with the backend's optional confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<T> {
    pub data: T,
    pub message: Option<String>,
}

/// Parses a body into JSON. An empty body is `null`.
pub(crate) fn parse_body(bytes: &[u8]) -> Result<Value, BackendError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Unwraps `data` from an envelope, or takes the value as-is.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<Envelope<T>, BackendError> {
    let (payload, message) = match value {
        Value::Object(mut map) if map.contains_key(DATA_KEY) => {
            let message = string_field(&map, MESSAGE_KEY);
            (map.remove(DATA_KEY).unwrap_or(Value::Null), message)
        },
        other => (other, None),
    };

    Ok(Envelope { data: serde_json::from_value(payload)?, message })
}

/// Best explanation carried by an error body: `message`, else `error`, else empty.
#[must_use]
pub fn error_message(value: &Value) -> String {
    let Value::Object(map) = value else {
        return String::new();
    };
    string_field(map, MESSAGE_KEY).or_else(|| string_field(map, ERROR_KEY)).unwrap_or_default()
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}
