//! CLI command definitions for settings-compare
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod convert;
pub mod diff;

use clap::{Parser, Subcommand};
use convert::ConvertArgs;
use diff::DiffArgs;
use std::path::PathBuf;

/// Compare layered JSON settings files and convert between nested and colon-keyed forms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Diff two settings files, printing the overrides found in the second
    ///
    /// The first file is the base settings file, the second the override. The
    /// diff is itself an override: only new and changed settings are printed.
    Diff(DiffArgs),

    /// Convert a file to plain nested JSON, i.e. no colons in keys
    #[command(name = "tojson", visible_alias = "to-json")]
    ToJson(ConvertArgs),

    /// Convert a file to .NET user-secrets form, i.e. colons in keys
    #[command(name = "tokeys", visible_alias = "to-keys")]
    ToKeys(ConvertArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_diff() {
        let cli = Cli::try_parse_from(["settings-compare", "diff", "a.json", "b.json", "--flat"])
            .unwrap();
        match cli.command {
            Command::Diff(args) => {
                assert_eq!(args.base, PathBuf::from("a.json"));
                assert_eq!(args.override_file, PathBuf::from("b.json"));
                assert!(args.flat);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_diff_requires_two_files() {
        assert!(Cli::try_parse_from(["settings-compare", "diff", "a.json"]).is_err());
        assert!(Cli::try_parse_from(["settings-compare", "diff", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_converters_require_one_file() {
        assert!(Cli::try_parse_from(["settings-compare", "tojson"]).is_err());
        assert!(Cli::try_parse_from(["settings-compare", "tokeys", "a", "b"]).is_err());
        let cli = Cli::try_parse_from(["settings-compare", "to-keys", "a.json"]).unwrap();
        assert!(matches!(cli.command, Command::ToKeys(_)));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "settings-compare",
            "tojson",
            "a.json",
            "--verbose",
            "--log",
            "off",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.log, "off");
    }
}
