//! Blank line normalization for rendered Markdown.

/// Collapse runs of blank lines into a single blank line.
///
/// A line is blank when it holds only whitespace. The first line of each run
/// is kept as-is; the rest of the run is dropped. Non-blank lines are never
/// touched. Applying the function twice gives the same result as once.
///
/// # Examples
///
/// ```
/// use ydoc_render::collapse_blank_lines;
///
/// assert_eq!(collapse_blank_lines("a\n\n\n\nb\n"), "a\n\nb\n");
/// ```
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut previous_blank = false;

    for line in text.split_inclusive('\n') {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        output.push_str(line);
    }

    output
}
