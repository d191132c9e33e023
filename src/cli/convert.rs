//! `tojson` and `tokeys` subcommands: single-file normalisation.

use crate::config::Config;
use crate::flatten::KeyPolicy;
use clap::Args;
use std::path::PathBuf;

/// Arguments shared by the conversion subcommands
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Settings file to convert
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Keys containing ':': expand (default) or reject
    #[arg(long, value_name = "POLICY")]
    pub key_policy: Option<KeyPolicy>,
}

impl ConvertArgs {
    /// Key policy from the command line, falling back to configuration.
    pub fn key_policy(&self, config: &Config) -> KeyPolicy {
        self.key_policy.unwrap_or(config.keys.policy)
    }
}
