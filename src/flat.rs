//! Key/value pairs and the flat, colon-keyed view of a document.

use crate::error::{Error, Result};
use crate::flatten::{KeyPolicy, flatten_with};
use crate::path::{KeyPath, SEPARATOR};
use crate::unflatten::nest;
use crate::value::{Scalar, TreeValue};
use std::collections::BTreeMap;

/// One leaf of a settings document: its path and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub path: KeyPath,
    pub value: Scalar,
}

impl KeyValue {
    pub fn new(path: impl Into<KeyPath>, value: impl Into<Scalar>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Colon-joined key, e.g. `ConnectionStrings:Default`.
    pub fn key(&self) -> String {
        self.path.to_string()
    }
}

/// Mapping from colon-joined path to leaf value, one entry per path.
///
/// Iteration is in lexicographic key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatView {
    entries: BTreeMap<String, Scalar>,
}

impl FlatView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a document into a view using the default key policy.
    pub fn from_tree(tree: &TreeValue) -> Result<Self> {
        Self::from_tree_with(tree, KeyPolicy::default())
    }

    /// Flatten a document into a view with an explicit key policy.
    pub fn from_tree_with(tree: &TreeValue, policy: KeyPolicy) -> Result<Self> {
        Self::from_key_values(flatten_with(tree, policy)?)
    }

    /// Collect pairs into a view.
    ///
    /// A path that appears twice, or a path that runs through another pair's
    /// leaf (`a` and `a:b`), is a conflict. Every view can therefore be
    /// rebuilt into a nested document.
    pub fn from_key_values(kvs: impl IntoIterator<Item = KeyValue>) -> Result<Self> {
        let mut entries: BTreeMap<String, Scalar> = BTreeMap::new();
        for kv in kvs {
            let key = kv.key();
            if let Some(existing) = entries.get(&key) {
                return Err(Error::conflict(key, existing.to_string(), kv.value.to_string()));
            }
            check_ancestors(&entries, &kv)?;
            check_descendants(&entries, &kv, &key)?;
            entries.insert(key, kv.value);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The entries as key/value pairs, in key order.
    pub fn to_key_values(&self) -> Vec<KeyValue> {
        self.entries
            .iter()
            .map(|(k, v)| KeyValue::new(k.as_str(), v.clone()))
            .collect()
    }
}

/// A shorter path already ended as a leaf where `kv` needs an object.
fn check_ancestors(entries: &BTreeMap<String, Scalar>, kv: &KeyValue) -> Result<()> {
    for len in 1..kv.path.depth() {
        let prefix = kv.path.prefix_string(len);
        if let Some(existing) = entries.get(&prefix) {
            let incoming = nest(&kv.path.segments()[len..], &kv.value);
            return Err(Error::conflict(prefix, existing.to_string(), incoming.to_string()));
        }
    }
    Ok(())
}

/// A longer path already runs through the leaf `kv` would write.
fn check_descendants(entries: &BTreeMap<String, Scalar>, kv: &KeyValue, key: &str) -> Result<()> {
    // Keys under `key:` are contiguous in sort order.
    let start = format!("{key}{SEPARATOR}");
    let Some((longer, existing)) = entries.range(start..).next() else {
        return Ok(());
    };
    let longer = KeyPath::parse(longer);
    if kv.path.is_strict_prefix_of(&longer) {
        let existing = nest(&longer.segments()[kv.path.depth()..], existing);
        return Err(Error::conflict(key, existing.to_string(), kv.value.to_string()));
    }
    Ok(())
}
