//! CLI parse: clap types for the configurator. No behavior; definitions only.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Eclipse workspace configurator - applies setup/update templates to a workspace
/// or saves workspace changes back into the update templates.
#[derive(Parser, Debug)]
#[command(name = "eclipse-configurator", version)]
#[command(about = "Reconciles an Eclipse workspace with its setup and update templates")]
#[command(group(ArgGroup::new("mode").required(true).args(["update", "changes"])))]
pub struct Cli {
    /// Create or update the workspace from the templates
    #[arg(short = 'u', long)]
    pub update: bool,

    /// Save changed workspace preferences into the update templates
    #[arg(short = 'c', long)]
    pub changes: bool,

    /// Also save preferences that are not yet part of the update templates
    #[arg(short = 'n', long, requires = "changes")]
    pub include_new: bool,

    /// Workspace directory (overrides WORKSPACE_PATH)
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Templates directory containing setup/ and update/ (overrides ECLIPSE_TEMPLATES_PATH)
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Replacement patterns file (overrides REPLACEMENT_PATTERNS_PATH)
    #[arg(long)]
    pub replacements: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Define a property for placeholder resolution (NAME=VALUE)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_definition)]
    pub defines: Vec<(String, String)>,

    /// Summary format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stdout, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// What a run does, derived from the mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Update,
    SaveChanges { include_new: bool },
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        if self.changes {
            RunMode::SaveChanges {
                include_new: self.include_new,
            }
        } else {
            RunMode::Update
        }
    }
}

fn parse_definition(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}
