//! Shape checks shared by the argument parsers.

use crate::{Error, Result};
use serde_json::{Map, Value};

pub(super) fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::invalid_statement(format!("{what} must be an object, got {value}")))
}

/// Lists accept a single item in place of a one-element list.
pub(super) fn list(value: &Value) -> impl Iterator<Item = &Value> {
    let items = match value {
        Value::Array(items) => items.as_slice(),
        Value::Null => &[],
        item => core::slice::from_ref(item),
    };
    items.iter().filter(|item| !item.is_null())
}

pub(super) fn string(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_statement(format!("{what} must be a string, got {value}")))
}

pub(super) fn strings(value: &Value, what: &str) -> Result<Vec<String>> {
    list(value).map(|item| string(item, what)).collect()
}

pub(super) fn boolean(value: &Value, what: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::invalid_statement(format!("{what} must be a boolean, got {value}")))
}

pub(super) fn integer(value: &Value, what: &str) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| Error::invalid_statement(format!("{what} must be an integer, got {value}")))
}
