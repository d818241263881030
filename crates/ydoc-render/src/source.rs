//! Per-file rendering entry points.

use std::path::{Path, PathBuf};

use crate::normalize::collapse_blank_lines;
use crate::renderer::render_document;
use crate::tree::{DecodeError, decode};

/// Failure to produce Markdown for one source file.
///
/// Failures are isolated to the file they name; callers decide whether to
/// skip the file, log it, or abort.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Source file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Offending source file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Source text could not be decoded.
    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        /// Offending source file.
        path: PathBuf,
        /// Underlying decode error.
        source: DecodeError,
    },
}

impl SourceError {
    /// Path of the source file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}

/// Decode YAML text and render it as a normalized Markdown body.
///
/// # Errors
///
/// Returns [`DecodeError`] if the text is not a YAML document with a mapping root.
pub fn render_markdown(text: &str) -> Result<String, DecodeError> {
    let doc = decode(text)?;
    Ok(collapse_blank_lines(&render_document(&doc)))
}

/// Read a YAML file and render it as a normalized Markdown body.
///
/// # Errors
///
/// Returns [`SourceError::Read`] if the file cannot be read and
/// [`SourceError::Decode`] if its content cannot be decoded.
pub fn render_file(path: &Path) -> Result<String, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let body = render_markdown(&text).map_err(|source| SourceError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = body.len(), "Rendered source file");
    Ok(body)
}
