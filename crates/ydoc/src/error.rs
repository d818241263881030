//! CLI error types.

use ydoc_build::BuildError;
use ydoc_config::ConfigError;
use ydoc_render::SourceError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0} source file(s) could not be rendered")]
    Failures(usize),
}
