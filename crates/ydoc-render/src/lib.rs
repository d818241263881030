//! Order-preserving YAML to Markdown renderer.
//!
//! The crate turns one YAML document into a Markdown body in three steps:
//!
//! 1. [`decode`] parses the text into a [`Document`], keeping mapping keys in
//!    the order they were written.
//! 2. [`render_document`] walks the tree depth-first and emits nested bullet
//!    lists, `sql` fences for query-like fields and links for `https://` items.
//! 3. [`collapse_blank_lines`] removes redundant blank lines.
//!
//! [`render_markdown`] and [`render_file`] run the three steps together.
//!
//! # Example
//!
//! ```
//! use ydoc_render::render_markdown;
//!
//! let markdown = render_markdown("a:\n  b: v\n").unwrap();
//! assert_eq!(markdown, "- a:\n    - b:\n        ***v***\n");
//! ```

mod normalize;
mod renderer;
mod source;
mod tree;

pub use normalize::collapse_blank_lines;
pub use renderer::{INDENT, LINK_MARKER, QUERY_KEY_MARKER, render_document, render_entries, render_value};
pub use source::{SourceError, render_file, render_markdown};
pub use tree::{DecodeError, Document, Node, OrderedEntry, decode};
