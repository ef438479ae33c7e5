//! Coercion helpers for untyped request payloads.
//!
//! Strategies receive payloads as raw JSON and turn them into typed values
//! through these helpers before anything else touches them. Unknown keys are
//! ignored; `null` is treated the same as an absent key.

use serde_json::{Map, Value};

use crate::error::ValidationError;

pub type Object = Map<String, Value>;

pub fn as_object(payload: &Value) -> Result<&Object, ValidationError> {
    payload.as_object().ok_or(ValidationError::NotAnObject)
}

/// Reads `field` as a string that must be non-empty after trimming.
pub fn required_string(object: &Object, field: &'static str) -> Result<String, ValidationError> {
    match object.get(field) {
        Some(Value::String(s)) => required_str(Some(s.as_str()), field).map(str::to_string),
        _ => Err(ValidationError::Required { field }),
    }
}

pub fn required_str<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::Required { field }),
    }
}

pub fn optional_string(
    object: &Object,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "string",
        }),
    }
}

pub fn optional_bool(
    object: &Object,
    field: &'static str,
) -> Result<Option<bool>, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ValidationError::WrongType {
            field,
            expected: "boolean",
        }),
    }
}

/// Reads a 1-based page number.
pub fn optional_page(
    object: &Object,
    field: &'static str,
) -> Result<Option<u32>, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1)
            .map(Some)
            .ok_or_else(|| page_error(field)),
        Some(_) => Err(page_error(field)),
    }
}

fn page_error(field: &'static str) -> ValidationError {
    ValidationError::WrongType {
        field,
        expected: "a positive integer",
    }
}

/// Rejects an explicit page of zero.
pub fn check_page(page: Option<u32>, field: &'static str) -> Result<Option<u32>, ValidationError> {
    match page {
        Some(0) => Err(page_error(field)),
        other => Ok(other),
    }
}

#[cfg(test)]
#[path = "tests/payload_tests.rs"]
mod tests;
