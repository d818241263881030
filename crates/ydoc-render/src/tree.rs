//! Order-preserving YAML document tree.
//!
//! YAML mappings decoded into a `HashMap` (or any keyed container) lose the
//! order in which keys were written, and typed decoding resolves `0x1F` or
//! `True` into values whose printed form differs from the source. [`decode`]
//! builds the tree straight from the parser's event stream instead: mapping
//! entries are collected in textual order, duplicates included, and every
//! scalar keeps the text it was written with.

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// A single key/value pair of a mapping, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedEntry {
    /// Literal key text.
    pub key: String,
    /// Decoded value.
    pub value: Node,
}

impl OrderedEntry {
    /// Create an entry from a key and a value.
    pub fn new(key: impl Into<String>, value: Node) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A decoded YAML node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Mapping with entries in source order.
    Mapping(Vec<OrderedEntry>),
    /// Sequence of heterogeneous nodes.
    Sequence(Vec<Node>),
    /// Scalar exactly as written (`0x1F`, `1.50`, `True`, `null` and `~`
    /// included). An omitted value is the empty string.
    Scalar(String),
    /// A node kind that has no representation here, such as an alias.
    Null,
}

impl Node {
    /// Create a scalar node.
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    /// Short name of the node kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Scalar(_) => "scalar",
            Self::Null => "null",
        }
    }

    /// Scalar text, if this node is a scalar.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Reduce a key node to its text. Only scalar keys carry text.
    fn into_key(self) -> String {
        match self {
            Self::Scalar(value) => value,
            Self::Mapping(_) | Self::Sequence(_) | Self::Null => String::new(),
        }
    }
}

/// A decoded document whose root is a mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level entries in source order.
    pub entries: Vec<OrderedEntry>,
}

impl Document {
    /// Top-level keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Check whether the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Error returned when source text cannot be decoded into a [`Document`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Text is not well-formed YAML.
    #[error("YAML parse error: {0}")]
    Parse(#[from] ScanError),
    /// Text holds more than one YAML document.
    #[error("expected a single YAML document, found {count}")]
    MultipleDocuments {
        /// Number of documents in the stream.
        count: usize,
    },
    /// Document root is not a mapping.
    #[error("invalid document structure: expected a mapping at the root, found {found}")]
    InvalidStructure {
        /// Kind of the root node that was found.
        found: &'static str,
    },
}

/// Decode YAML text into an order-preserving [`Document`].
///
/// # Errors
///
/// Returns [`DecodeError::Parse`] for malformed YAML,
/// [`DecodeError::MultipleDocuments`] for a multi-document stream and
/// [`DecodeError::InvalidStructure`] when the root is not a mapping.
pub fn decode(text: &str) -> Result<Document, DecodeError> {
    let mut builder = TreeBuilder::new(text);
    Parser::new_from_str(text).load(&mut builder, true)?;

    let count = builder.documents.len();
    if count > 1 {
        return Err(DecodeError::MultipleDocuments { count });
    }
    match builder.documents.pop() {
        Some(Node::Mapping(entries)) => Ok(Document { entries }),
        Some(other) => Err(DecodeError::InvalidStructure { found: other.kind() }),
        None => Err(DecodeError::InvalidStructure {
            found: "empty document",
        }),
    }
}

/// Collection being assembled while its events arrive.
enum Frame {
    Sequence(Vec<Node>),
    Mapping {
        entries: Vec<OrderedEntry>,
        pending_key: Option<String>,
    },
}

/// Event receiver that assembles [`Node`] trees, one per document.
struct TreeBuilder<'a> {
    source: &'a str,
    stack: Vec<Frame>,
    documents: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            stack: Vec::new(),
            documents: Vec::new(),
        }
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            None => self.documents.push(node),
            Some(Frame::Sequence(items)) => items.push(node),
            Some(Frame::Mapping {
                entries,
                pending_key,
            }) => match pending_key.take() {
                Some(key) => entries.push(OrderedEntry { key, value: node }),
                None => *pending_key = Some(node.into_key()),
            },
        }
    }

    fn close(&mut self) {
        let node = match self.stack.pop() {
            Some(Frame::Sequence(items)) => Node::Sequence(items),
            Some(Frame::Mapping { entries, .. }) => Node::Mapping(entries),
            None => return,
        };
        self.push(node);
    }

    /// The parser reports an omitted value as a plain `~` positioned at the
    /// following token, so a `~` is only literal when the source has one
    /// at the event's position.
    fn scalar_text(&self, value: String, style: TScalarStyle, mark: Marker) -> String {
        if style == TScalarStyle::Plain
            && value == "~"
            && self.source.chars().nth(mark.index()) != Some('~')
        {
            return String::new();
        }
        value
    }
}

impl MarkedEventReceiver for TreeBuilder<'_> {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            // Tags are not resolved; the scalar keeps its written text.
            Event::Scalar(value, style, ..) => {
                let text = self.scalar_text(value, style, mark);
                self.push(Node::Scalar(text));
            }
            Event::SequenceStart(..) => self.stack.push(Frame::Sequence(Vec::new())),
            Event::MappingStart(..) => self.stack.push(Frame::Mapping {
                entries: Vec::new(),
                pending_key: None,
            }),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Alias(_) => self.push(Node::Null),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(node: &Node) -> Vec<&str> {
        match node {
            Node::Mapping(entries) => entries.iter().map(|e| e.key.as_str()).collect(),
            other => panic!("expected mapping, got {}", other.kind()),
        }
    }

    #[test]
    fn test_decode_preserves_top_level_order() {
        let doc = decode("zeta: 1\nalpha: 2\nmike: 3\nbravo: 4\n").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mike", "bravo"]);
    }

    #[test]
    fn test_decode_preserves_nested_order_regardless_of_value_type() {
        let yaml = r"
job:
  scrape_interval: 30s
  targets:
    - a
  static: {z: 1, y: 2}
  enabled: true
  job_name: node
";
        let doc = decode(yaml).unwrap();
        let job = &doc.entries[0].value;
        assert_eq!(
            keys(job),
            ["scrape_interval", "targets", "static", "enabled", "job_name"]
        );
        let Node::Mapping(entries) = job else {
            unreachable!()
        };
        assert_eq!(keys(&entries[2].value), ["z", "y"]);
    }

    fn scalars(doc: &Document) -> Vec<&str> {
        doc.entries
            .iter()
            .map(|e| e.value.as_scalar().unwrap())
            .collect()
    }

    #[test]
    fn test_decode_scalars_keep_text_form() {
        let doc = decode("port: 9090\nratio: 1.5\nwhole: 2.0\non: true\nname: node\n").unwrap();
        assert_eq!(scalars(&doc), ["9090", "1.5", "2.0", "true", "node"]);
    }

    #[test]
    fn test_decode_scalars_are_not_coerced() {
        let doc = decode("a: 0x1F\nb: 1.50\nc: True\nd: 1e3\ne: +12\nf: 0o17\ng: .NaN\n").unwrap();
        assert_eq!(
            scalars(&doc),
            ["0x1F", "1.50", "True", "1e3", "+12", "0o17", ".NaN"]
        );
    }

    #[test]
    fn test_decode_quoted_scalars_are_verbatim() {
        let doc = decode("a: \"~\"\nb: '010'\nc: \"yes\"\n").unwrap();
        assert_eq!(scalars(&doc), ["~", "010", "yes"]);
    }

    #[test]
    fn test_decode_sequence_is_heterogeneous() {
        let doc = decode("items:\n  - plain\n  - {a: 1}\n  - [x, y]\n  - ~\n").unwrap();
        assert_eq!(
            doc.entries[0].value,
            Node::Sequence(vec![
                Node::scalar("plain"),
                Node::Mapping(vec![OrderedEntry::new("a", Node::scalar("1"))]),
                Node::Sequence(vec![Node::scalar("x"), Node::scalar("y")]),
                Node::scalar("~"),
            ])
        );
    }

    #[test]
    fn test_decode_null_forms_keep_text() {
        let doc = decode("word: null\ntilde: ~\nempty:\nlast: 1\n").unwrap();
        assert_eq!(scalars(&doc), ["null", "~", "", "1"]);
    }

    #[test]
    fn test_decode_omitted_value_at_end_is_empty() {
        let doc = decode("a: ~\nb:\n").unwrap();
        assert_eq!(scalars(&doc), ["~", ""]);
    }

    #[test]
    fn test_decode_omitted_sequence_item_is_empty() {
        let doc = decode("items:\n  -\n  - ~\n").unwrap();
        assert_eq!(
            doc.entries[0].value,
            Node::Sequence(vec![Node::scalar(""), Node::scalar("~")])
        );
    }

    #[test]
    fn test_decode_duplicate_keys_pass_through() {
        let doc = decode("a: 1\nb: 2\na: 3\n").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b", "a"]);
        assert_eq!(doc.entries[2].value, Node::scalar("3"));
    }

    #[test]
    fn test_decode_tagged_value_uses_content() {
        let doc = decode("ref: !Ref other\n").unwrap();
        assert_eq!(doc.entries[0].value, Node::scalar("other"));
    }

    #[test]
    fn test_decode_anchor_keeps_value_and_alias_is_null() {
        let doc = decode("base: &b\n  x: 1\ncopy: *b\nafter: 2\n").unwrap();
        assert_eq!(
            doc.entries[0].value,
            Node::Mapping(vec![OrderedEntry::new("x", Node::scalar("1"))])
        );
        assert_eq!(doc.entries[1].value, Node::Null);
        assert_eq!(doc.entries[2].value, Node::scalar("2"));
    }

    #[test]
    fn test_decode_tagged_collection_uses_content() {
        let doc = decode("set: !!set {a: null}\n").unwrap();
        assert_eq!(
            doc.entries[0].value,
            Node::Mapping(vec![OrderedEntry::new("a", Node::scalar("null"))])
        );
    }

    #[test]
    fn test_decode_complex_key_is_empty_text() {
        let doc = decode("? [a, b]\n: v\n").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), [""]);
    }

    #[test]
    fn test_decode_non_string_keys_use_text() {
        let doc = decode("200: ok\nTrue: yes\n0x10: hex\n").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["200", "True", "0x10"]);
    }

    #[test]
    fn test_decode_root_sequence_is_invalid_structure() {
        let err = decode("- a\n- b\n").unwrap_err();
        assert!(
            matches!(err, DecodeError::InvalidStructure { found: "sequence" }),
            "got {err:?}"
        );
        assert!(err.to_string().contains("invalid document structure"));
    }

    #[test]
    fn test_decode_root_scalar_is_invalid_structure() {
        let err = decode("just text").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidStructure { found: "scalar" }));
    }

    #[test]
    fn test_decode_malformed_yaml_is_parse_error() {
        let err = decode("key: [unclosed").unwrap_err();
        assert!(matches!(err, DecodeError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_decode_empty_text_is_invalid_structure() {
        let err = decode("").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidStructure { .. }), "got {err:?}");
    }

    #[test]
    fn test_decode_multiple_documents_is_rejected() {
        let err = decode("a: 1\n---\nb: 2\n").unwrap_err();
        assert!(
            matches!(err, DecodeError::MultipleDocuments { count: 2 }),
            "got {err:?}"
        );
    }
}
