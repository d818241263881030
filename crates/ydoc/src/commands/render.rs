//! `ydoc render` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use ydoc_render::render_file;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// YAML file to render.
    file: PathBuf,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let body = render_file(&self.file)?;
        Term::stdout().write_str(&body)?;
        Ok(())
    }
}
