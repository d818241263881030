//! Per-file document composition.
//!
//! Wraps a rendered Markdown body with a heading named after the source file
//! and a line pointing back to the source, either as a repository link or as
//! a plain code span.

use std::path::{Component, Path};

/// Suffix appended to source file names to form output file names.
pub const OUTPUT_SUFFIX: &str = "-docs.md";

/// Output file name for a source file (`node.yaml` -> `node.yaml-docs.md`).
#[must_use]
pub fn output_file_name(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{name}{OUTPUT_SUFFIX}")
}

/// Context needed to compose the page for one source file.
#[derive(Clone, Copy, Debug)]
pub struct PageContext<'a> {
    /// Source file that was rendered.
    pub source: &'a Path,
    /// Directory source paths are shown relative to.
    pub base_dir: &'a Path,
    /// Repository URL for source links.
    pub repository: Option<&'a str>,
    /// Branch for source links.
    pub branch: &'a str,
}

impl PageContext<'_> {
    /// Page title: the source file name without its extension.
    #[must_use]
    pub fn title(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Source path relative to the base directory, with `/` separators.
    #[must_use]
    pub fn relative_source(&self) -> String {
        let relative = self.source.strip_prefix(self.base_dir).unwrap_or(self.source);
        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Markdown line pointing back to the source file.
    #[must_use]
    pub fn source_line(&self) -> String {
        let relative = self.relative_source();
        match self.repository {
            Some(repository) => format!(
                "Source: [{relative}]({}/blob/{}/{relative})",
                repository.trim_end_matches('/'),
                self.branch
            ),
            None => format!("Source: `{relative}`"),
        }
    }
}

/// Compose the final page for one source file.
#[must_use]
pub fn compose(page: &PageContext<'_>, body: &str) -> String {
    let mut document = format!("## {}\n\n{}\n\n{body}", page.title(), page.source_line());
    if !document.ends_with('\n') {
        document.push('\n');
    }
    document
}
