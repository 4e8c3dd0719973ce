//! Eclipse Configurator Binary
//!
//! Command-line entry point: installs logging, builds the run context and
//! executes the selected mode.

use anyhow::Context;
use clap::Parser;
use eclipse_configurator::cli::{load_config, map_error, Cli, RunContext};
use eclipse_configurator::error::ConfiguratorError;
use eclipse_configurator::logging::{init_logging, LoggingConfig};
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let working_directory = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let logging_config = build_logging_config(&cli, &working_directory);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let invocation: Vec<String> = std::env::args().collect();
    info!("Starting with arguments: {}", invocation.join(" "));

    match run(&cli) {
        Ok(output) => {
            info!("Command completed successfully");
            print!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("{}", describe(&e));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = RunContext::new(cli).context("Failed to initialize configurator")?;
    let output = context
        .execute(cli.mode())
        .with_context(|| format!("Failed to process {}", context.paths().workspace_root.display()))?;
    Ok(output)
}

fn describe(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ConfiguratorError>() {
        Some(inner) => format!("{}: {}", e, map_error(inner)),
        None => format!("{:#}", e),
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, working_directory: &Path) -> LoggingConfig {
    let mut config = load_config(cli, working_directory)
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
        if config.output == "file" {
            config.output = "file+stderr".to_string();
        }
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
    if config.file.is_relative() {
        config.file = working_directory.join(&config.file);
    }

    config
}
