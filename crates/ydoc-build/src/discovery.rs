//! Source file discovery by filesystem walking.
//!
//! A configured source is either a single file, taken as-is, or a directory
//! walked recursively for files with one of the configured extensions.
//! Hidden entries are skipped and results are sorted so that builds are
//! reproducible regardless of directory iteration order.

use std::fs;
use std::path::{Path, PathBuf};

use ydoc_config::Source;

use crate::error::BuildError;

/// A configured source together with the files discovered under it.
#[derive(Clone, Debug)]
pub struct SourceGroup {
    /// The configured source.
    pub source: Source,
    /// Discovered files, sorted.
    pub files: Vec<PathBuf>,
}

/// Discover source files for a single configured source.
///
/// # Errors
///
/// Returns [`BuildError::SourceNotFound`] if the source path does not exist
/// and [`BuildError::Io`] if a directory cannot be read.
pub fn discover(source: &Source, extensions: &[String]) -> Result<Vec<PathBuf>, BuildError> {
    let metadata =
        fs::metadata(&source.path).map_err(|_| BuildError::SourceNotFound(source.path.clone()))?;

    if !metadata.is_dir() {
        return Ok(vec![source.path.clone()]);
    }

    let mut files = Vec::new();
    walk_directory(&source.path, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

/// Discover files for every configured source, in configuration order.
///
/// Sources that cannot be discovered are logged and skipped.
pub fn discover_all(sources: &[Source], extensions: &[String]) -> Vec<SourceGroup> {
    sources
        .iter()
        .filter_map(|source| match discover(source, extensions) {
            Ok(files) => {
                tracing::debug!(
                    path = %source.path.display(),
                    file_count = files.len(),
                    "Discovered source files"
                );
                Some(SourceGroup {
                    source: source.clone(),
                    files,
                })
            }
            Err(e) => {
                tracing::warn!(path = %source.path.display(), error = %e, "Skipping source");
                None
            }
        })
        .collect()
}

fn walk_directory(
    dir: &Path,
    extensions: &[String],
    files: &mut Vec<PathBuf>,
) -> Result<(), BuildError> {
    for entry in fs::read_dir(dir).map_err(BuildError::io(dir))? {
        let entry = entry.map_err(BuildError::io(dir))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            walk_directory(&path, extensions, files)?;
        } else if has_extension(&path, extensions) {
            files.push(path);
        }
    }
    Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e.as_str())))
}
