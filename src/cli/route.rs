//! CLI route: run context and dispatch of the selected mode to the reconciler
//! and presentation.

use crate::cli::parse::{Cli, RunMode};
use crate::cli::presentation::{format_harvest_report, format_reconcile_report};
use crate::config::{ConfigLoader, ConfiguratorConfig, RunPaths};
use crate::error::ConfiguratorError;
use crate::resolver::{AmbientProperties, ReplacementTable, Resolver};
use crate::workspace::Reconciler;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: resolved paths and the reconciler.
/// Built from the CLI arguments using ConfigLoader only.
#[derive(Debug)]
pub struct RunContext {
    paths: RunPaths,
    reconciler: Reconciler,
    format: String,
}

impl RunContext {
    /// Create run context for the process working directory.
    pub fn new(cli: &Cli) -> Result<Self, ConfiguratorError> {
        let working_directory =
            std::env::current_dir().map_err(ConfiguratorError::WorkingDirectory)?;
        Self::with_working_directory(cli, &working_directory)
    }

    /// Create run context resolving relative paths against `working_directory`.
    pub fn with_working_directory(
        cli: &Cli,
        working_directory: &Path,
    ) -> Result<Self, ConfiguratorError> {
        let mut config = load_config(cli, working_directory)?;
        apply_path_overrides(&mut config, cli);

        let paths = RunPaths::resolve(&config, working_directory)?;
        let table = ReplacementTable::load(paths.replacements_file.as_deref(), working_directory);
        let ambient =
            AmbientProperties::detect(working_directory).with_definitions(cli.defines.iter().cloned());
        let resolver = Arc::new(Resolver::with_process_fallbacks(table, ambient));

        info!(
            workspace = %paths.workspace_root.display(),
            templates = %paths.templates_root.display(),
            "Run context initialized"
        );

        Ok(Self {
            reconciler: Reconciler::new(paths.layout(), resolver),
            paths,
            format: cli.format.clone(),
        })
    }

    pub fn paths(&self) -> &RunPaths {
        &self.paths
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Run the selected mode and return the formatted summary.
    pub fn execute(&self, mode: RunMode) -> Result<String, ConfiguratorError> {
        match mode {
            RunMode::Update => {
                let report = self.reconciler.update_workspace()?;
                info!(
                    merged = report.merged,
                    copied = report.copied,
                    failures = report.failures.len(),
                    "Workspace update finished"
                );
                format_reconcile_report(&report, &self.format)
            }
            RunMode::SaveChanges { include_new } => {
                let report = self.reconciler.save_changes_in_workspace(include_new)?;
                info!(
                    saved = report.saved,
                    failures = report.failures.len(),
                    "Saving workspace changes finished"
                );
                format_harvest_report(&report, &self.format)
            }
        }
    }
}

/// Load configuration for `cli`: explicit `--config` file or the implicit one.
pub fn load_config(
    cli: &Cli,
    working_directory: &Path,
) -> Result<ConfiguratorConfig, ConfiguratorError> {
    match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(&working_directory.join(path)),
        None => ConfigLoader::load(working_directory),
    }
}

fn apply_path_overrides(config: &mut ConfiguratorConfig, cli: &Cli) {
    if let Some(ref workspace) = cli.workspace {
        config.workspace_path = Some(workspace.clone());
    }
    if let Some(ref templates) = cli.templates {
        config.templates_path = Some(templates.clone());
    }
    if let Some(ref replacements) = cli.replacements {
        config.replacements_path = Some(replacements.clone());
    }
}
