//! Source file naming checks.

use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Reject source files whose names contain spaces.
///
/// Generated page names are derived from source file names and end up in
/// links, so every offender is collected and reported at once.
///
/// # Errors
///
/// Returns [`BuildError::Lint`] listing every offending path.
pub fn check_file_names<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Result<(), BuildError> {
    let offenders: Vec<PathBuf> = paths
        .into_iter()
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().contains(' '))
        })
        .map(Path::to_path_buf)
        .collect();

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(BuildError::Lint(offenders))
    }
}
