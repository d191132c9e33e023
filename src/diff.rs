//! Override-only diff of two flat settings views.
//!
//! The diff answers "what would an override file need to contain to turn the
//! base into the override": keys the override adds, and keys whose value it
//! changes. Keys the override drops are never reported; the flat model has no
//! way to express a deletion.

use crate::flat::{FlatView, KeyValue};
use crate::value::Scalar;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How an explicit `null` in the override is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Null is a value like any other and is reported when it differs.
    #[default]
    Keep,
    /// Null entries in the override are skipped.
    Omit,
}

impl std::str::FromStr for NullPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep" => Ok(NullPolicy::Keep),
            "omit" => Ok(NullPolicy::Omit),
            _ => Err(format!(
                "Invalid null policy '{}'. Valid options: keep, omit",
                s
            )),
        }
    }
}

impl fmt::Display for NullPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NullPolicy::Keep => write!(f, "keep"),
            NullPolicy::Omit => write!(f, "omit"),
        }
    }
}

/// Options for [`diff_views`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub null_policy: NullPolicy,
}

/// Whether an entry is new or replaces a base value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Changed,
}

/// A single key the override introduces or changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffEntry {
    /// Colon-joined path
    pub key: String,
    /// Value in the base, `None` if the base does not have the key
    pub base: Option<Scalar>,
    /// Value in the override
    pub value: Scalar,
}

impl DiffEntry {
    pub fn kind(&self) -> ChangeKind {
        if self.base.is_some() {
            ChangeKind::Changed
        } else {
            ChangeKind::Added
        }
    }

    pub fn to_key_value(&self) -> KeyValue {
        KeyValue::new(self.key.as_str(), self.value.clone())
    }
}

/// Complete diff between a base and an override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDiff {
    /// Base description (e.g., "appsettings.json")
    pub base_label: String,
    /// Override description
    pub override_label: String,
    /// Entries in key order
    pub entries: Vec<DiffEntry>,
}

impl ConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries for keys absent from the base.
    pub fn added(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind() == ChangeKind::Added)
    }

    /// Entries for keys whose value the override changes.
    pub fn changed(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.kind() == ChangeKind::Changed)
    }

    /// The diff as override key/value pairs.
    pub fn key_values(&self) -> Vec<KeyValue> {
        self.entries.iter().map(DiffEntry::to_key_value).collect()
    }

    pub fn with_labels(mut self, base: impl Into<String>, over: impl Into<String>) -> Self {
        self.base_label = base.into();
        self.override_label = over.into();
        self
    }
}

impl fmt::Display for ConfigDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            writeln!(f, "No differences found.")?;
            return Ok(());
        }

        if !self.base_label.is_empty() || !self.override_label.is_empty() {
            writeln!(f, "Diff: {} -> {}", self.base_label, self.override_label)?;
            writeln!(f, "{}", "=".repeat(60))?;
        }

        for entry in &self.entries {
            match &entry.base {
                None => writeln!(f, "  + {} = {}", entry.key, entry.value)?,
                Some(old) => writeln!(f, "  ~ {}: {} -> {}", entry.key, old, entry.value)?,
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} added, {} changed",
            self.added().count(),
            self.changed().count()
        )?;

        Ok(())
    }
}

/// Keys the override adds or changes, as override key/value pairs.
///
/// Null in the override is a real value: `{}` vs `{"x": null}` yields `x`.
pub fn diff(base: &FlatView, over: &FlatView) -> Vec<KeyValue> {
    diff_views(base, over, &DiffOptions::default()).key_values()
}

/// Compare two views and describe every key the override adds or changes.
pub fn diff_views(base: &FlatView, over: &FlatView, options: &DiffOptions) -> ConfigDiff {
    let mut entries = Vec::new();

    for (key, value) in over.iter() {
        if options.null_policy == NullPolicy::Omit && value.is_null() {
            debug!(key, "Skipping null override");
            continue;
        }

        match base.get(key) {
            None => {
                debug!(key, value = %value, "Key added by override");
                entries.push(DiffEntry {
                    key: key.to_string(),
                    base: None,
                    value: value.clone(),
                });
            }
            Some(old) if old != value => {
                debug!(key, old = %old, new = %value, "Key overridden");
                entries.push(DiffEntry {
                    key: key.to_string(),
                    base: Some(old.clone()),
                    value: value.clone(),
                });
            }
            Some(_) => {}
        }
    }

    ConfigDiff {
        entries,
        ..Default::default()
    }
}
