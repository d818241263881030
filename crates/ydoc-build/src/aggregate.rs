//! Aggregation of per-file documents into a single document.
//!
//! The aggregated document starts with a level-1 title. Sources configured
//! with a section get a level-2 heading, and the documents under it are
//! demoted by one heading level so that the outline stays consistent.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};
use ydoc_render::collapse_blank_lines;

/// Documents belonging to one configured source.
#[derive(Clone, Debug, Default)]
pub struct AggregateSection {
    /// Optional section heading.
    pub heading: Option<String>,
    /// Composed per-file documents, in discovery order.
    pub documents: Vec<String>,
}

/// Demote every ATX heading by one level.
///
/// Headings are located with a Markdown parser, so `#` lines inside fenced
/// code blocks are left alone. Level-6 headings cannot be demoted further and
/// are kept as they are.
#[must_use]
pub fn demote_headings(markdown: &str) -> String {
    let insert_at: Vec<usize> = Parser::new(markdown)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Heading { level, .. }) if level != HeadingLevel::H6 => {
                markdown[range.clone()].find('#').map(|offset| range.start + offset)
            }
            _ => None,
        })
        .collect();

    let mut output = String::with_capacity(markdown.len() + insert_at.len());
    let mut last = 0;
    for offset in insert_at {
        output.push_str(&markdown[last..offset]);
        output.push('#');
        last = offset;
    }
    output.push_str(&markdown[last..]);
    output
}

/// Build the aggregated document.
#[must_use]
pub fn aggregate(title: &str, sections: &[AggregateSection]) -> String {
    let mut output = format!("# {title}\n\n");

    for section in sections.iter().filter(|s| !s.documents.is_empty()) {
        match &section.heading {
            Some(heading) => {
                output.push_str("## ");
                output.push_str(heading);
                output.push_str("\n\n");
                for document in &section.documents {
                    output.push_str(&demote_headings(document));
                    output.push('\n');
                }
            }
            None => {
                for document in &section.documents {
                    output.push_str(document);
                    output.push('\n');
                }
            }
        }
    }

    collapse_blank_lines(&output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_demote_headings() {
        assert_eq!(
            demote_headings("## node\n\ntext\n\n### sub\n"),
            "### node\n\ntext\n\n#### sub\n"
        );
    }

    #[test]
    fn test_demote_skips_code_blocks_and_h6() {
        let markdown = "# a\n\n```sql\n# not a heading\n```\n\n###### deep\n";
        assert_eq!(
            demote_headings(markdown),
            "## a\n\n```sql\n# not a heading\n```\n\n###### deep\n"
        );
    }

    #[test]
    fn test_demote_ignores_hash_in_text() {
        let markdown = "- ***#channel***\n- key:\n    ***a # b***\n";
        assert_eq!(demote_headings(markdown), markdown);
    }

    #[test]
    fn test_aggregate_with_sections() {
        let sections = vec![
            AggregateSection {
                heading: Some("Scrape Configs".to_owned()),
                documents: vec![
                    "## node\n\nSource: `node.yaml`\n\n- a:\n    ***1***\n".to_owned(),
                    "## api\n\nSource: `api.yaml`\n\n- b:\n    ***2***\n".to_owned(),
                ],
            },
            AggregateSection {
                heading: None,
                documents: vec!["## rules\n\nSource: `rules.yaml`\n\n- c:\n".to_owned()],
            },
        ];

        assert_eq!(
            aggregate("Infra", &sections),
            "# Infra\n\n\
             ## Scrape Configs\n\n\
             ### node\n\nSource: `node.yaml`\n\n- a:\n    ***1***\n\n\
             ### api\n\nSource: `api.yaml`\n\n- b:\n    ***2***\n\n\
             ## rules\n\nSource: `rules.yaml`\n\n- c:\n\n"
        );
    }

    #[test]
    fn test_aggregate_skips_empty_sections() {
        let sections = vec![AggregateSection {
            heading: Some("Empty".to_owned()),
            documents: Vec::new(),
        }];
        assert_eq!(aggregate("Docs", &sections), "# Docs\n\n");
    }
}
