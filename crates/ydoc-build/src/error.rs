//! Build error types.

use std::path::{Path, PathBuf};

use ydoc_render::SourceError;

/// Fatal error that stops a documentation build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Configured source path does not exist.
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Source file names violate the naming convention.
    #[error("Source file names with spaces found: {}", join_paths(.0))]
    Lint(Vec<PathBuf>),

    /// Discovery produced no source files at all.
    #[error("No source files found")]
    NoSources,
}

impl BuildError {
    /// Wrap an I/O error with the path it occurred at.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Non-fatal failure for a single source file. The file is skipped.
#[derive(Debug, thiserror::Error)]
pub enum FileFailure {
    /// Source could not be read or decoded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Another source already produced the same output file name.
    #[error(
        "Output {name} for {} collides with {}, skipping",
        path.display(),
        first.display()
    )]
    Collision {
        /// Output file name shared by both sources.
        name: String,
        /// Source that was skipped.
        path: PathBuf,
        /// Source that produced the output first.
        first: PathBuf,
    },
}

impl FileFailure {
    /// Path of the source file that was skipped.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Source(err) => err.path(),
            Self::Collision { path, .. } => path,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
