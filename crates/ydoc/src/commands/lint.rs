//! `ydoc lint` command implementation.

use std::path::PathBuf;

use clap::Args;
use ydoc_build::{check_file_names, discover};
use ydoc_config::Config;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the lint command.
#[derive(Args)]
pub(crate) struct LintArgs {
    /// Path to configuration file (default: auto-discover ydoc.toml).
    #[arg(short, long, env = "YDOC_CONFIG")]
    config: Option<PathBuf>,
}

impl LintArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let mut files = Vec::new();
        for source in &config.sources_resolved {
            files.extend(discover(source, &config.discovery.extensions)?);
        }

        if config.discovery.forbid_spaces {
            check_file_names(files.iter().map(PathBuf::as_path))?;
        }

        output.success(format_args!("{} source file(s) OK", files.len()));
        Ok(())
    }
}
