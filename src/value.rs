//! Tree value model for parsed settings documents.
//!
//! A [`TreeValue`] is the recursive shape of a settings file: scalars and
//! nested objects. Arrays have no variant; they are rejected when a parsed
//! JSON value is converted into the model.

use crate::error::{Error, Result};
use crate::path::SEPARATOR;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Largest integer magnitude an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A leaf value: anything but an object.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Convert to a `serde_json::Value` for rendering.
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Number(n) => number_to_json(*n),
            Scalar::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

/// A node of a settings document.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(BTreeMap<String, TreeValue>),
}

impl TreeValue {
    /// An object with no keys.
    pub fn empty_object() -> Self {
        TreeValue::Object(BTreeMap::new())
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, TreeValue>> {
        match self {
            TreeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Number of scalar leaves reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            TreeValue::Object(map) => map.values().map(TreeValue::leaf_count).sum(),
            _ => 1,
        }
    }

    /// Lay `top` over `self`.
    ///
    /// Objects merge key by key; any other pairing is replaced by `top`,
    /// including an explicit null.
    pub fn overlay(self, top: TreeValue) -> TreeValue {
        match (self, top) {
            (TreeValue::Object(mut base_map), TreeValue::Object(top_map)) => {
                for (key, top_value) in top_map {
                    let merged = match base_map.remove(&key) {
                        Some(base_value) => base_value.overlay(top_value),
                        None => top_value,
                    };
                    base_map.insert(key, merged);
                }
                TreeValue::Object(base_map)
            }
            (_, top) => top,
        }
    }

    /// Convert a parsed JSON value, rejecting arrays anywhere in the tree.
    pub fn from_json(value: Value) -> Result<Self> {
        let mut trail = Vec::new();
        convert(value, &mut trail)
    }

    /// Convert to a `serde_json::Value`, keys in lexicographic order.
    pub fn to_json(&self) -> Value {
        match self {
            TreeValue::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, child) in map {
                    out.insert(key.clone(), child.to_json());
                }
                Value::Object(out)
            }
            TreeValue::Null => Value::Null,
            TreeValue::Bool(b) => Value::Bool(*b),
            TreeValue::Number(n) => number_to_json(*n),
            TreeValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<Scalar> for TreeValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => TreeValue::Null,
            Scalar::Bool(b) => TreeValue::Bool(b),
            Scalar::Number(n) => TreeValue::Number(n),
            Scalar::String(s) => TreeValue::String(s),
        }
    }
}

impl fmt::Display for TreeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

fn convert(value: Value, trail: &mut Vec<String>) -> Result<TreeValue> {
    match value {
        Value::Null => Ok(TreeValue::Null),
        Value::Bool(b) => Ok(TreeValue::Bool(b)),
        Value::Number(n) => match n.as_f64() {
            Some(f) => Ok(TreeValue::Number(f)),
            None => Err(Error::UnsupportedValue {
                path: trail_to_string(trail),
            }),
        },
        Value::String(s) => Ok(TreeValue::String(s)),
        Value::Array(_) => Err(Error::UnsupportedValue {
            path: trail_to_string(trail),
        }),
        Value::Object(map) => {
            let mut out = BTreeMap::new();
            for (key, child) in map {
                trail.push(key);
                let converted = convert(child, trail)?;
                let key = trail.pop().unwrap_or_default();
                out.insert(key, converted);
            }
            Ok(TreeValue::Object(out))
        }
    }
}

fn trail_to_string(trail: &[String]) -> String {
    if trail.is_empty() {
        "(root)".to_string()
    } else {
        trail.join(SEPARATOR.to_string().as_str())
    }
}

/// Integral values inside the exact f64 range render without a fraction.
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
