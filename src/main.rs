//! settings-compare
//!
//! Diffs a base JSON settings file against an override and converts settings
//! between nested JSON and .NET user-secrets style colon keys.

use anyhow::Result;
use clap::Parser;
use settings_compare::cli::convert::ConvertArgs;
use settings_compare::cli::diff::DiffArgs;
use settings_compare::cli::{Cli, Command};
use settings_compare::compare::{compare_files, file_to_flat, file_to_nested};
use settings_compare::config::{Config, ConfigLoader};
use settings_compare::logging::{self, LogTarget};
use settings_compare::render::{flat_view_json, render, to_pretty};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::from_arg(&cli.log), cli.verbose)?;

    let mut loader = ConfigLoader::load(cli.config.as_deref())?;
    debug!(tiers = ?loader.tiers(), "Using configuration");
    let config = loader.config_mut();

    match cli.command {
        Command::Diff(args) => {
            args.apply_to(config);
            run_diff(config, &args)?;
        }
        Command::ToJson(args) => {
            run_to_json(config, &args)?;
        }
        Command::ToKeys(args) => {
            run_to_keys(config, &args)?;
        }
    }

    Ok(())
}

/// Compare base and override, then print the override diff.
fn run_diff(config: &Config, args: &DiffArgs) -> Result<()> {
    let comparison = compare_files(
        &args.base,
        &args.override_file,
        config.keys.policy,
        &config.diff_options(),
    )?;

    // Render everything before printing so a failure leaves no partial output.
    let diff_kvs = comparison.diff.key_values();
    let diff_text = to_pretty(&render(&diff_kvs, config.diff.format)?)?;

    if config.output.show_inputs {
        let base_text = to_pretty(&flat_view_json(&comparison.base))?;
        let over_text = to_pretty(&flat_view_json(&comparison.over))?;

        info!("Base: {}", args.base.display());
        println!("{}", base_text);
        info!("Override: {}", args.override_file.display());
        println!("{}", over_text);
        println!();
        print!("{}", comparison.diff);
        println!();
    }

    println!("{}", diff_text);
    Ok(())
}

/// Print a file as plain nested JSON.
fn run_to_json(config: &Config, args: &ConvertArgs) -> Result<()> {
    let nested = file_to_nested(&args.file, args.key_policy(config))?;
    println!("{}", to_pretty(&nested.to_json())?);
    Ok(())
}

/// Print a file in colon-keyed form.
fn run_to_keys(config: &Config, args: &ConvertArgs) -> Result<()> {
    let view = file_to_flat(&args.file, args.key_policy(config))?;
    println!("{}", to_pretty(&flat_view_json(&view))?);
    Ok(())
}
