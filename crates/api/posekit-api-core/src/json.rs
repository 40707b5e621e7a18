use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::value::RawValue;

/// Errors produced while converting shorthand JSON into raw values.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("raw value parse error: {0}")]
    RawParse(String),
}

/// Convert a shorthand JSON scalar into a [`RawValue`]. Numbers and strings
/// are the only raw shapes a pose target may carry; anything else is a
/// configuration mistake surfaced to the caller.
pub fn parse_raw_value(value: &JsonValue) -> Result<RawValue, JsonError> {
    match value {
        JsonValue::Number(n) => n
            .as_f64()
            .map(|f| RawValue::Number(f as f32))
            .ok_or_else(|| JsonError::RawParse(format!("non-finite number: {n}"))),
        JsonValue::String(s) => Ok(RawValue::Text(s.clone())),
        other => Err(JsonError::RawParse(format!(
            "expected number or string, got {other}"
        ))),
    }
}

/// Convert a [`RawValue`] back into its shorthand JSON form.
pub fn raw_value_to_json(value: &RawValue) -> JsonValue {
    match value {
        RawValue::Number(n) => serde_json::json!(*n),
        RawValue::Text(s) => JsonValue::String(s.clone()),
    }
}
