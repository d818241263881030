//! Batch documentation builder.
//!
//! Runs the whole pipeline for a loaded [`Config`]:
//!
//! 1. Discover source files for every configured source
//! 2. Check source file names
//! 3. Render every file in parallel
//! 4. Write one composed page per file into the output directory
//! 5. Remove pages left over from sources that no longer exist
//! 6. Write the aggregated document
//!
//! A source file that fails to render is reported in [`BuildReport::failures`]
//! and skipped; it never aborts the build.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use ydoc_config::Config;
use ydoc_render::{SourceError, render_file};

use crate::aggregate::{AggregateSection, aggregate};
use crate::compose::{OUTPUT_SUFFIX, PageContext, compose, output_file_name};
use crate::discovery::discover_all;
use crate::error::{BuildError, FileFailure};
use crate::lint::check_file_names;

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages written, in discovery order.
    pub generated: Vec<PathBuf>,
    /// Stale pages removed from the output directory.
    pub removed: Vec<PathBuf>,
    /// Source files that were skipped.
    pub failures: Vec<FileFailure>,
    /// Aggregated document, if one was written.
    pub aggregated: Option<PathBuf>,
}

impl BuildReport {
    /// Check whether every discovered source file produced a page.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds Markdown documentation from configured YAML sources.
#[derive(Debug)]
pub struct DocsBuilder<'a> {
    config: &'a Config,
    remove_stale: bool,
}

impl<'a> DocsBuilder<'a> {
    /// Create a builder for the given configuration.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            remove_stale: true,
        }
    }

    /// Enable or disable removal of stale pages (enabled by default).
    #[must_use]
    pub fn with_stale_removal(mut self, enabled: bool) -> Self {
        self.remove_stale = enabled;
        self
    }

    /// Run the build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if no source files are found, a file name check
    /// fails, or the output cannot be written.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let groups = discover_all(
            &self.config.sources_resolved,
            &self.config.discovery.extensions,
        );
        let files: Vec<&Path> = groups
            .iter()
            .flat_map(|group| group.files.iter().map(PathBuf::as_path))
            .collect();
        if files.is_empty() {
            return Err(BuildError::NoSources);
        }

        if self.config.discovery.forbid_spaces {
            check_file_names(files.iter().copied())?;
        }

        // Rendering is independent per file; results come back in input order.
        let rendered: Vec<Result<String, SourceError>> =
            files.par_iter().map(|path| render_file(path)).collect();

        let output_dir = &self.config.output_resolved.individual_dir;
        fs::create_dir_all(output_dir).map_err(BuildError::io(output_dir))?;

        let mut report = BuildReport::default();
        let mut produced: HashMap<String, PathBuf> = HashMap::new();
        let mut sections = Vec::with_capacity(groups.len());
        let mut results = rendered.into_iter();

        for group in &groups {
            let mut section = AggregateSection {
                heading: group.source.section.clone(),
                documents: Vec::new(),
            };

            for (path, result) in group.files.iter().zip(results.by_ref()) {
                let body = match result {
                    Ok(body) => body,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping source file");
                        report.failures.push(e.into());
                        continue;
                    }
                };

                let name = output_file_name(path);
                if let Some(first) = produced.get(&name) {
                    let failure = FileFailure::Collision {
                        name,
                        path: path.clone(),
                        first: first.clone(),
                    };
                    tracing::warn!(error = %failure, "Skipping source file");
                    report.failures.push(failure);
                    continue;
                }

                let page = self.page_context(path);
                let document = compose(&page, &body);
                let target = output_dir.join(&name);
                fs::write(&target, &document).map_err(BuildError::io(&target))?;
                tracing::info!(source = %path.display(), output = %target.display(), "Generated page");

                produced.insert(name, path.clone());
                report.generated.push(target);
                section.documents.push(document);
            }

            sections.push(section);
        }

        if self.remove_stale {
            // Pages of sources that failed this run are kept, not treated as orphans.
            let expected: HashSet<String> = files.iter().map(|p| output_file_name(p)).collect();
            report.removed = self.remove_stale_pages(output_dir, &expected)?;
        }

        if let Some(path) = &self.config.output_resolved.aggregated_path {
            write_aggregate(path, &aggregate(&self.config.title, &sections))?;
            tracing::info!(path = %path.display(), "Generated aggregated document");
            report.aggregated = Some(path.clone());
        }

        tracing::info!(
            generated = report.generated.len(),
            removed = report.removed.len(),
            failed = report.failures.len(),
            "Build completed"
        );
        Ok(report)
    }

    fn page_context<'p>(&'p self, source: &'p Path) -> PageContext<'p> {
        PageContext {
            source,
            base_dir: &self.config.base_dir,
            repository: self.config.repository.as_deref(),
            branch: &self.config.branch,
        }
    }

    /// Delete generated pages in `output_dir` that this build did not expect.
    fn remove_stale_pages(
        &self,
        output_dir: &Path,
        expected: &HashSet<String>,
    ) -> Result<Vec<PathBuf>, BuildError> {
        let aggregated = self.config.output_resolved.aggregated_path.as_deref();
        let mut removed = Vec::new();

        for entry in fs::read_dir(output_dir).map_err(BuildError::io(output_dir))? {
            let entry = entry.map_err(BuildError::io(output_dir))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path();

            if !name.ends_with(OUTPUT_SUFFIX)
                || expected.contains(&name)
                || aggregated == Some(path.as_path())
                || !entry.file_type().is_ok_and(|t| t.is_file())
            {
                continue;
            }

            fs::remove_file(&path).map_err(BuildError::io(&path))?;
            tracing::info!(path = %path.display(), "Removed stale page");
            removed.push(path);
        }

        removed.sort();
        Ok(removed)
    }
}

fn write_aggregate(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
    }
    fs::write(path, content).map_err(BuildError::io(path))
}
