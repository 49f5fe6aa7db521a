//! Tolerant accessors over loosely typed pipeline trees.
//!
//! Every helper returns `None` (or an empty/zero value) on a shape mismatch so
//! a single malformed pipeline never aborts analysis of the rest of a config.

use serde_json::{Map, Value};

pub(crate) fn as_map(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object()
}

/// Non-empty string at `key`; anything else is absent.
pub(crate) fn str_at<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub(crate) fn trigger_of(pipeline: &Value) -> Option<&Map<String, Value>> {
    as_map(pipeline)?.get("trigger").and_then(as_map)
}

pub(crate) fn trigger_type(pipeline: &Value) -> Option<&str> {
    trigger_of(pipeline).and_then(|t| str_at(t, "type"))
}

pub(crate) fn trigger_config(pipeline: &Value) -> Option<&Map<String, Value>> {
    trigger_of(pipeline)?.get("config").and_then(as_map)
}

/// The raw `steps` list, when it is a list.
pub(crate) fn steps_of(pipeline: &Value) -> Option<&Vec<Value>> {
    as_map(pipeline)?.get("steps").and_then(Value::as_array)
}

/// Steps that are maps; other entries are skipped.
pub(crate) fn step_maps(pipeline: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    steps_of(pipeline)
        .into_iter()
        .flatten()
        .filter_map(as_map)
}

pub(crate) fn step_type(step: &Map<String, Value>) -> Option<&str> {
    str_at(step, "type")
}

/// Render a config value for comparison and display.
///
/// Strings are taken verbatim, other values use their JSON text. `null` counts
/// as absent so that a missing key and an explicit `null` compare equal.
pub(crate) fn stringify(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn describe(value: &Value) -> String {
    stringify(Some(value)).unwrap_or_else(|| "<none>".to_string())
}
