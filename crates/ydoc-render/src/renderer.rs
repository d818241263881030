//! Markdown rendering of decoded YAML trees.
//!
//! Every mapping entry becomes a bullet line `- key:` and its value is
//! rendered one [`INDENT`] step deeper:
//!
//! - nested mappings recurse into further bullet lines;
//! - sequence scalars become `- ***item***` bullets, or links when the item
//!   contains `https://`;
//! - scalars under a key containing `query` become `sql` code fences;
//! - any other scalar is emphasized as `***value***`;
//! - nulls and omitted values render as nothing.
//!
//! Rendering is total: there is no failure mode for any [`Node`] tree.

use std::fmt::Write;

use crate::tree::{Document, Node, OrderedEntry};

/// Indentation added per nesting level.
pub const INDENT: &str = "    ";

/// Key substring that switches scalar values to SQL code fences.
pub const QUERY_KEY_MARKER: &str = "query";

/// Sequence item substring that switches the item to link rendering.
pub const LINK_MARKER: &str = "https://";

/// Render a whole document at the root indentation.
///
/// The result is not normalized; see [`collapse_blank_lines`](crate::collapse_blank_lines).
#[must_use]
pub fn render_document(doc: &Document) -> String {
    render_entries(&doc.entries, "")
}

/// Render mapping entries as bullet lines at `indent`.
#[must_use]
pub fn render_entries(entries: &[OrderedEntry], indent: &str) -> String {
    let mut output = String::new();
    write_entries(&mut output, entries, indent);
    output
}

/// Render a value at `indent`. `key` is the name of the enclosing entry.
#[must_use]
pub fn render_value(key: &str, value: &Node, indent: &str) -> String {
    let mut output = String::new();
    write_value(&mut output, key, value, indent);
    output
}

fn write_entries(output: &mut String, entries: &[OrderedEntry], indent: &str) {
    let nested = format!("{indent}{INDENT}");
    for entry in entries {
        // Keys that already carry a list marker are emitted verbatim.
        if entry.key.starts_with('-') {
            let _ = writeln!(output, "{}:", entry.key);
        } else {
            let _ = writeln!(output, "{indent}- {}:", entry.key);
        }
        write_value(output, &entry.key, &entry.value, &nested);
    }
}

fn write_value(output: &mut String, key: &str, value: &Node, indent: &str) {
    match value {
        Node::Mapping(entries) => write_entries(output, entries, indent),
        Node::Sequence(items) => {
            for item in items {
                match item {
                    Node::Scalar(text) if text.is_empty() => {}
                    Node::Scalar(text) => write_list_item(output, text, indent),
                    other => write_value(output, key, other, indent),
                }
            }
        }
        // `******` would read as a thematic break.
        Node::Scalar(text) if text.is_empty() => {}
        Node::Scalar(text) if key.contains(QUERY_KEY_MARKER) => {
            write_code_block(output, text, indent);
        }
        Node::Scalar(text) => {
            let _ = writeln!(output, "{indent}***{}***", text.trim_end_matches('\n'));
        }
        Node::Null => {}
    }
}

fn write_list_item(output: &mut String, text: &str, indent: &str) {
    let text = text.trim_end_matches('\n');
    if text.contains(LINK_MARKER) {
        let _ = writeln!(output, "{indent}- [***{text}***]({text})");
    } else {
        let _ = writeln!(output, "{indent}- ***{text}***");
    }
}

fn write_code_block(output: &mut String, text: &str, indent: &str) {
    let _ = writeln!(output, "{indent}```sql");
    for line in text.lines() {
        if line.trim().is_empty() {
            output.push('\n');
        } else {
            let _ = writeln!(output, "{indent}{line}");
        }
    }
    let _ = writeln!(output, "{indent}```");
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tree::decode;

    fn render(yaml: &str) -> String {
        render_document(&decode(yaml).unwrap())
    }

    #[test]
    fn test_render_nested_mapping() {
        assert_eq!(render("a:\n  b: v\n"), "- a:\n    - b:\n        ***v***\n");
    }

    #[test]
    fn test_render_keeps_entry_order() {
        assert_eq!(
            render("second: 2\nfirst: 1\n"),
            "- second:\n    ***2***\n- first:\n    ***1***\n"
        );
    }

    #[test]
    fn test_render_query_key_as_sql_fence() {
        assert_eq!(
            render("promql_query: up == 1\n"),
            "- promql_query:\n    ```sql\n    up == 1\n    ```\n"
        );
    }

    #[test]
    fn test_render_query_marker_is_substring_match() {
        let output = render("subquery_id: abc\n");
        assert!(output.contains("```sql"), "{output}");
    }

    #[test]
    fn test_render_query_marker_is_case_sensitive() {
        assert_eq!(render("Query: abc\n"), "- Query:\n    ***abc***\n");
    }

    #[test]
    fn test_render_multiline_query_indents_every_line() {
        let yaml = "alert:\n  query: |\n    sum(rate(x[5m]))\n\n    > 0\n";
        assert_eq!(
            render(yaml),
            "- alert:\n    - query:\n        ```sql\n        sum(rate(x[5m]))\n\n        > 0\n        ```\n"
        );
    }

    #[test]
    fn test_render_sequence_items() {
        let yaml = "targets:\n  - https://example.com/x\n  - plain-text\n";
        assert_eq!(
            render(yaml),
            "- targets:\n    - [***https://example.com/x***](https://example.com/x)\n    - ***plain-text***\n"
        );
    }

    #[test]
    fn test_render_http_is_not_a_link() {
        assert_eq!(
            render("urls:\n  - http://example.com\n"),
            "- urls:\n    - ***http://example.com***\n"
        );
    }

    #[test]
    fn test_render_scalar_with_url_is_not_a_link() {
        assert_eq!(
            render("homepage: https://example.com\n"),
            "- homepage:\n    ***https://example.com***\n"
        );
    }

    #[test]
    fn test_render_sequence_of_mappings_at_same_indent() {
        let yaml = "static_configs:\n  - targets:\n      - localhost:9100\n    labels:\n      env: prod\n";
        assert_eq!(
            render(yaml),
            "- static_configs:\n    - targets:\n        - ***localhost:9100***\n    - labels:\n        - env:\n            ***prod***\n"
        );
    }

    #[test]
    fn test_render_nested_sequence_keeps_key_context() {
        let node = Node::Sequence(vec![Node::Sequence(vec![Node::scalar("a")])]);
        assert_eq!(render_value("queries", &node, ""), "- ***a***\n");
    }

    #[test]
    fn test_render_list_marker_key_is_unindented() {
        let entries = vec![OrderedEntry::new(
            "- item",
            Node::Mapping(vec![OrderedEntry::new("name", Node::scalar("x"))]),
        )];
        assert_eq!(
            render_entries(&entries, INDENT),
            "- item:\n        - name:\n            ***x***\n"
        );
    }

    #[test]
    fn test_render_null_is_empty_and_siblings_render() {
        let entries = vec![
            OrderedEntry::new("before", Node::scalar("1")),
            OrderedEntry::new("missing", Node::Null),
            OrderedEntry::new("after", Node::scalar("2")),
        ];
        assert_eq!(render_value("missing", &Node::Null, ""), "");
        assert_eq!(
            render_entries(&entries, ""),
            "- before:\n    ***1***\n- missing:\n- after:\n    ***2***\n"
        );
    }

    #[test]
    fn test_render_null_sequence_items_are_skipped() {
        let node = Node::Sequence(vec![Node::Null, Node::scalar("kept")]);
        assert_eq!(render_value("items", &node, ""), "- ***kept***\n");
    }

    #[test]
    fn test_render_block_scalar_drops_trailing_newline() {
        assert_eq!(
            render("note: |\n  keep this\n"),
            "- note:\n    ***keep this***\n"
        );
    }

    #[test]
    fn test_render_block_scalar_list_items_drop_trailing_newline() {
        assert_eq!(
            render("notes:\n  - |\n    line one\n  - |\n    https://example.com/runbook\n  - plain\n"),
            "- notes:\n    - ***line one***\n    - [***https://example.com/runbook***](https://example.com/runbook)\n    - ***plain***\n"
        );
    }

    #[test]
    fn test_render_fence_is_followed_by_next_entry() {
        assert_eq!(
            render("expr_query: up\nfor: 5m\n"),
            "- expr_query:\n    ```sql\n    up\n    ```\n- for:\n    ***5m***\n"
        );
    }

    #[test]
    fn test_render_scalars_keep_source_spelling() {
        assert_eq!(
            render("retention: 1.50\nmask: 0x1F\nenabled: True\nlabel: null\nnone: ~\n"),
            "- retention:\n    ***1.50***\n- mask:\n    ***0x1F***\n- enabled:\n    ***True***\n\
             - label:\n    ***null***\n- none:\n    ***~***\n"
        );
    }

    #[test]
    fn test_render_omitted_values_are_empty() {
        assert_eq!(
            render("empty:\nitems:\n  -\n  - kept\nlast_query:\n"),
            "- empty:\n- items:\n    - ***kept***\n- last_query:\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = decode("a:\n  b: [x, https://y]\n  c_query: q\nd: 1\n").unwrap();
        assert_eq!(render_document(&doc), render_document(&doc));
    }

    #[test]
    fn test_render_empty_collections() {
        assert_eq!(render("a: {}\nb: []\n"), "- a:\n- b:\n");
    }
}
