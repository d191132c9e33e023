//! Rebuilding a nested document from colon-keyed leaves.

use crate::error::{Error, Result};
use crate::flat::KeyValue;
use crate::value::{Scalar, TreeValue};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::debug;

/// Rebuild a nested object from key/value pairs.
///
/// Each full path may be written once, and no path may pass through a leaf
/// written by another pair. Either collision fails the whole call with
/// [`Error::Conflict`]; no partial tree is returned. Input order only decides
/// which of two colliding pairs is reported as the existing value.
pub fn unflatten(kvs: &[KeyValue]) -> Result<TreeValue> {
    let mut root = BTreeMap::new();
    for kv in kvs {
        insert(&mut root, kv)?;
    }
    debug!(pairs = kvs.len(), keys = root.len(), "Rebuilt nested document");
    Ok(TreeValue::Object(root))
}

fn insert(root: &mut BTreeMap<String, TreeValue>, kv: &KeyValue) -> Result<()> {
    let segments = kv.path.segments();
    let Some((leaf, interior)) = segments.split_last() else {
        return Ok(());
    };

    let mut level = root;
    for (depth, segment) in interior.iter().enumerate() {
        let node = level
            .entry(segment.clone())
            .or_insert_with(TreeValue::empty_object);
        level = match node {
            TreeValue::Object(children) => children,
            existing => {
                // A shorter path already ended here as a leaf.
                let incoming = nest(&segments[depth + 1..], &kv.value);
                return Err(Error::conflict(
                    kv.path.prefix_string(depth + 1),
                    existing.to_string(),
                    incoming.to_string(),
                ));
            }
        };
    }

    match level.entry(leaf.clone()) {
        Entry::Occupied(existing) => Err(Error::conflict(
            kv.key(),
            existing.get().to_string(),
            kv.value.to_string(),
        )),
        Entry::Vacant(slot) => {
            slot.insert(kv.value.clone().into());
            Ok(())
        }
    }
}

/// The subtree a pair would create below the point of collision.
pub(crate) fn nest(segments: &[String], value: &Scalar) -> TreeValue {
    segments
        .iter()
        .rev()
        .fold(TreeValue::from(value.clone()), |child, segment| {
            TreeValue::Object(BTreeMap::from([(segment.clone(), child)]))
        })
}
