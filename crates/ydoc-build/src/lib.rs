//! Batch documentation generation for ydoc.
//!
//! Turns the sources named in a [`ydoc_config::Config`] into one Markdown
//! page per YAML file plus an aggregated document. The YAML rendering itself
//! lives in `ydoc-render`; this crate handles everything around it:
//! discovery, file name checks, page composition, stale page removal and
//! aggregation.
//!
//! # Example
//!
//! ```no_run
//! use ydoc_build::DocsBuilder;
//! use ydoc_config::Config;
//!
//! let config = Config::load(None, None)?;
//! let report = DocsBuilder::new(&config).build()?;
//! println!("{} pages written", report.generated.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod aggregate;
mod builder;
mod compose;
mod discovery;
mod error;
mod lint;

pub use aggregate::{AggregateSection, aggregate, demote_headings};
pub use builder::{BuildReport, DocsBuilder};
pub use compose::{OUTPUT_SUFFIX, PageContext, compose, output_file_name};
pub use discovery::{SourceGroup, discover, discover_all};
pub use error::{BuildError, FileFailure};
pub use lint::check_file_names;
