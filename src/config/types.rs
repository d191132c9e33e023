//! Configuration types for the settings-compare tool.

use crate::diff::{DiffOptions, NullPolicy};
use crate::flatten::KeyPolicy;
use crate::render::OutputForm;
use serde::{Deserialize, Serialize};

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diff: DiffConfig,

    #[serde(default)]
    pub keys: KeysConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for the `diff` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Treatment of explicit nulls in the override (default: keep).
    #[serde(default)]
    pub null_policy: NullPolicy,

    /// Default output form for the diff (default: json).
    #[serde(default)]
    pub format: OutputForm,
}

/// Settings for flattening documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Treatment of keys that contain ':' (default: expand).
    #[serde(default)]
    pub policy: KeyPolicy,
}

/// Settings for what gets printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the flattened base and override before the diff (default: true).
    #[serde(default = "default_show_inputs")]
    pub show_inputs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            show_inputs: default_show_inputs(),
        }
    }
}

fn default_show_inputs() -> bool {
    true
}

impl Config {
    /// Options for the differ.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            null_policy: self.diff.null_policy,
        }
    }
}
