//! Output forms: flat colon-keyed JSON and canonical nested JSON.
//!
//! Both forms are built from sorted maps, so object keys always come out in
//! lexicographic order whatever `serde_json` features are enabled.

use crate::error::Result;
use crate::flat::{FlatView, KeyValue};
use crate::unflatten::unflatten;
use serde_json::Value;

/// Output shape for a set of key/value pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputForm {
    /// One-level object keyed by colon-joined path
    Flat,
    /// Nested object
    #[default]
    Json,
}

impl std::str::FromStr for OutputForm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" | "keys" => Ok(OutputForm::Flat),
            "json" | "nested" => Ok(OutputForm::Json),
            _ => Err(format!("Invalid output form '{}'. Valid options: flat, json", s)),
        }
    }
}

impl std::fmt::Display for OutputForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputForm::Flat => write!(f, "flat"),
            OutputForm::Json => write!(f, "json"),
        }
    }
}

/// A flat view as a one-level JSON object.
pub fn flat_view_json(view: &FlatView) -> Value {
    let mut out = serde_json::Map::new();
    for (key, value) in view.iter() {
        out.insert(key.to_string(), value.to_json());
    }
    Value::Object(out)
}

/// Key/value pairs as a one-level JSON object. Repeated paths are a conflict.
pub fn flat_json(kvs: &[KeyValue]) -> Result<Value> {
    let view = FlatView::from_key_values(kvs.iter().cloned())?;
    Ok(flat_view_json(&view))
}

/// Key/value pairs re-nested into a JSON object.
pub fn nested_json(kvs: &[KeyValue]) -> Result<Value> {
    Ok(unflatten(kvs)?.to_json())
}

/// Key/value pairs in the requested form.
pub fn render(kvs: &[KeyValue], form: OutputForm) -> Result<Value> {
    match form {
        OutputForm::Flat => flat_json(kvs),
        OutputForm::Json => nested_json(kvs),
    }
}

/// Pretty JSON text with two-space indentation.
pub fn to_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
