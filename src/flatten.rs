//! Projection of a nested document onto its leaves.

use crate::error::{Error, Result};
use crate::flat::KeyValue;
use crate::path::{KeyPath, SEPARATOR};
use crate::value::{Scalar, TreeValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// How a JSON key that itself contains `:` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Read the key as a path fragment: `{"a:b": 1}` is the leaf `a:b`.
    #[default]
    Expand,
    /// Fail with [`Error::InvalidKey`].
    Reject,
}

impl std::str::FromStr for KeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "expand" => Ok(KeyPolicy::Expand),
            "reject" => Ok(KeyPolicy::Reject),
            _ => Err(format!(
                "Invalid key policy '{}'. Valid options: expand, reject",
                s
            )),
        }
    }
}

impl std::fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyPolicy::Expand => write!(f, "expand"),
            KeyPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Flatten a document into one key/value pair per scalar leaf.
///
/// Keys containing `:` are expanded into several segments. Pairs come out in
/// lexicographic key order per object level. A scalar root has no key and
/// yields nothing.
pub fn flatten(tree: &TreeValue) -> Vec<KeyValue> {
    let mut out = Vec::new();
    if let TreeValue::Object(map) = tree {
        collect(map, None, &mut out);
    }
    out
}

/// Flatten with an explicit policy for colon-bearing keys.
pub fn flatten_with(tree: &TreeValue, policy: KeyPolicy) -> Result<Vec<KeyValue>> {
    if policy == KeyPolicy::Reject {
        reject_colon_keys(tree, None)?;
    }
    let kvs = flatten(tree);
    debug!(leaves = kvs.len(), policy = %policy, "Flattened document");
    Ok(kvs)
}

fn collect(map: &BTreeMap<String, TreeValue>, prefix: Option<&KeyPath>, out: &mut Vec<KeyValue>) {
    for (key, value) in map {
        let path = extend(prefix, key);
        match value {
            TreeValue::Object(children) => collect(children, Some(&path), out),
            TreeValue::Null => out.push(KeyValue::new(path, Scalar::Null)),
            TreeValue::Bool(b) => out.push(KeyValue::new(path, *b)),
            TreeValue::Number(n) => out.push(KeyValue::new(path, *n)),
            TreeValue::String(s) => out.push(KeyValue::new(path, s.as_str())),
        }
    }
}

fn extend(prefix: Option<&KeyPath>, key: &str) -> KeyPath {
    match prefix {
        None => KeyPath::parse(key),
        Some(prefix) => key
            .split(SEPARATOR)
            .fold(prefix.clone(), |path, segment| path.child(segment)),
    }
}

fn reject_colon_keys(tree: &TreeValue, prefix: Option<&KeyPath>) -> Result<()> {
    let TreeValue::Object(map) = tree else {
        return Ok(());
    };
    for (key, value) in map {
        if key.contains(SEPARATOR) {
            let at = prefix.map(KeyPath::to_string).unwrap_or_default();
            return Err(Error::invalid_key(at, key.clone()));
        }
        let path = extend(prefix, key);
        reject_colon_keys(value, Some(&path))?;
    }
    Ok(())
}
