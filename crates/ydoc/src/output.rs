//! Status lines for the CLI.
//!
//! Everything is written to stderr; `ydoc render` keeps stdout for Markdown.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
    label: Style,
    done: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            label: Style::new().cyan(),
            done: Style::new().green().bold(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    /// `<label> <path>`, labels right-aligned so paths line up.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        self.line(format_args!(
            "{} {}",
            self.label.apply_to(format!("{label:>10}")),
            path.display()
        ));
    }

    pub(crate) fn success(&self, msg: impl Display) {
        self.line(self.done.apply_to(msg));
    }

    /// A file that was skipped; the run continues.
    pub(crate) fn warning(&self, msg: impl Display) {
        self.line(format_args!("{} {msg}", self.warn.apply_to("warning:")));
    }

    pub(crate) fn error(&self, err: impl Display) {
        self.line(format_args!("{} {err}", self.fail.apply_to("error:")));
    }

    fn line(&self, text: impl Display) {
        let _ = self.term.write_line(&text.to_string());
    }
}
