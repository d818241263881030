//! `ydoc generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use ydoc_build::DocsBuilder;
use ydoc_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover ydoc.toml).
    #[arg(short, long, env = "YDOC_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for per-file pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path of the aggregated document (overrides config).
    #[arg(long, conflicts_with = "no_aggregate")]
    aggregated: Option<PathBuf>,

    /// Do not write the aggregated document.
    #[arg(long)]
    no_aggregate: bool,

    /// Keep pages whose sources no longer exist.
    #[arg(long)]
    keep_stale: bool,
}

impl GenerateArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            individual_dir: self.output_dir,
            aggregated_path: self.aggregated,
            aggregate_enabled: self.no_aggregate.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.path("Output", &config.output_resolved.individual_dir);

        let report = DocsBuilder::new(&config)
            .with_stale_removal(!self.keep_stale)
            .build()?;

        for path in &report.removed {
            output.path("Removed", path);
        }
        for failure in &report.failures {
            output.warning(format_args!("skipped {failure}"));
        }
        if let Some(path) = &report.aggregated {
            output.path("Aggregated", path);
        }

        if !report.is_success() {
            return Err(CliError::Failures(report.failures.len()));
        }

        output.success(format_args!("Generated {} page(s)", report.generated.len()));
        Ok(())
    }
}
