//! End-to-end operations behind the CLI commands.
//!
//! Each function runs the whole pipeline for one command and hands back data;
//! printing is left to the caller.

use crate::diff::{ConfigDiff, DiffOptions, diff_views};
use crate::document::read_document;
use crate::error::Result;
use crate::flat::FlatView;
use crate::flatten::{KeyPolicy, flatten_with};
use crate::unflatten::unflatten;
use crate::value::TreeValue;
use std::path::Path;
use tracing::info;

/// Flattened inputs and the diff between them.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub base: FlatView,
    pub over: FlatView,
    pub diff: ConfigDiff,
}

/// Diff two loaded documents.
pub fn compare_documents(
    base: &TreeValue,
    over: &TreeValue,
    key_policy: KeyPolicy,
    options: &DiffOptions,
) -> Result<Comparison> {
    let base = FlatView::from_tree_with(base, key_policy)?;
    let over = FlatView::from_tree_with(over, key_policy)?;
    let diff = diff_views(&base, &over, options);
    Ok(Comparison { base, over, diff })
}

/// Load and diff two settings files.
pub fn compare_files(
    base_path: &Path,
    over_path: &Path,
    key_policy: KeyPolicy,
    options: &DiffOptions,
) -> Result<Comparison> {
    let base = read_document(base_path)?;
    let over = read_document(over_path)?;
    let mut comparison = compare_documents(&base, &over, key_policy, options)?;
    comparison.diff.base_label = base_path.display().to_string();
    comparison.diff.override_label = over_path.display().to_string();
    info!(
        base = comparison.base.len(),
        over = comparison.over.len(),
        diffs = comparison.diff.len(),
        null_policy = %options.null_policy,
        "Compared settings files"
    );
    Ok(comparison)
}

/// Normalise a document to plain nested JSON: colon keys become nesting.
pub fn normalize_nested(tree: &TreeValue, key_policy: KeyPolicy) -> Result<TreeValue> {
    unflatten(&flatten_with(tree, key_policy)?)
}

/// Normalise a document to its flat, colon-keyed view.
pub fn normalize_flat(tree: &TreeValue, key_policy: KeyPolicy) -> Result<FlatView> {
    FlatView::from_tree_with(tree, key_policy)
}

/// Load a file and normalise it to nested JSON.
pub fn file_to_nested(path: &Path, key_policy: KeyPolicy) -> Result<TreeValue> {
    let tree = read_document(path)?;
    let nested = normalize_nested(&tree, key_policy)?;
    info!(path = %path.display(), leaves = nested.leaf_count(), "Normalised to nested JSON");
    Ok(nested)
}

/// Load a file and normalise it to colon-keyed form.
pub fn file_to_flat(path: &Path, key_policy: KeyPolicy) -> Result<FlatView> {
    let tree = read_document(path)?;
    let view = normalize_flat(&tree, key_policy)?;
    info!(path = %path.display(), keys = view.len(), "Normalised to colon keys");
    Ok(view)
}
