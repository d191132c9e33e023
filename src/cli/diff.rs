//! Diff subcommand for settings-compare
//!
//! Compares a base settings file with an override.

use crate::config::Config;
use crate::diff::NullPolicy;
use crate::flatten::KeyPolicy;
use crate::render::OutputForm;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the diff subcommand
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Base settings file, e.g. appsettings.json
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Override settings file, e.g. appsettings.Development.json
    #[arg(value_name = "OVERRIDE")]
    pub override_file: PathBuf,

    /// Print the diff as flat, colon-keyed JSON
    #[arg(short, long, conflicts_with = "json")]
    pub flat: bool,

    /// Print the diff as nested JSON (default)
    #[arg(short, long)]
    pub json: bool,

    /// Explicit nulls in the override: keep (default) or omit
    #[arg(long, value_name = "POLICY")]
    pub null_policy: Option<NullPolicy>,

    /// Keys containing ':': expand (default) or reject
    #[arg(long, value_name = "POLICY")]
    pub key_policy: Option<KeyPolicy>,

    /// Print only the diff, without the flattened inputs and comparison
    #[arg(short, long)]
    pub quiet: bool,
}

impl DiffArgs {
    /// Output form requested on the command line, if any.
    pub fn output_form(&self) -> Option<OutputForm> {
        if self.flat {
            Some(OutputForm::Flat)
        } else if self.json {
            Some(OutputForm::Json)
        } else {
            None
        }
    }

    /// Fold command-line choices into the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(form) = self.output_form() {
            config.diff.format = form;
        }
        if let Some(policy) = self.null_policy {
            config.diff.null_policy = policy;
        }
        if let Some(policy) = self.key_policy {
            config.keys.policy = policy;
        }
        if self.quiet {
            config.output.show_inputs = false;
        }
    }
}
