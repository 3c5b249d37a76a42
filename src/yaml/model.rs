//! In-memory model of a block-style YAML mapping document.
//!
//! The model is lossless: every entry keeps the exact text of its key line,
//! the comment and blank lines in front of it, and the raw lines of scalar
//! values that span several lines (block scalars, sequences, flow
//! collections). Rendering an unmodified tree reproduces the source text line
//! for line, and editing one entry leaves the text of every other entry alone.

use crate::constants::INDENT_STEP;

/// A value in the mapping tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf value. Sequences and flow collections are leaves as well.
    Scalar(Scalar),
    /// A nested block mapping.
    Mapping(Mapping),
}

impl Node {
    /// The mapping held by this node, if any.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            Self::Scalar(_) => None,
        }
    }

    /// The scalar held by this node, if any.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Mapping(_) => None,
        }
    }

    /// Whether the node is a mapping.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }
}

/// How a scalar value was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// Nothing after the colon (`key:`), a YAML null.
    Empty,
    /// Unquoted text such as `8080` or `localhost`.
    Plain,
    /// Single- or double-quoted text.
    Quoted,
    /// Literal (`|`) or folded (`>`) block scalar.
    Block,
    /// Alias to an anchored node (`*name`).
    Alias,
    /// Block sequence or flow collection (`[a, b]`, `{a: 1}`).
    Collection,
}

impl ScalarStyle {
    /// Whether synthesis may replace a value of this style with a mapping.
    ///
    /// Aliases and collections carry structure the editor does not model, so
    /// replacing them is a synthesis conflict.
    #[must_use]
    pub const fn is_promotable(self) -> bool {
        !matches!(self, Self::Alias | Self::Collection)
    }
}

/// A leaf value together with its raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scalar {
    pub(crate) raw: String,
    pub(crate) style: ScalarStyle,
    pub(crate) continuation: Vec<String>,
}

impl Scalar {
    /// An empty (null) value, as written by `key:`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            raw: String::new(),
            style: ScalarStyle::Empty,
            continuation: Vec::new(),
        }
    }

    /// The value text as written on the key line, without any comment.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The source style of the value.
    #[must_use]
    pub const fn style(&self) -> ScalarStyle {
        self.style
    }

    /// Whether the value carries an `&anchor` that aliases may refer to.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.raw.starts_with('&')
    }

    /// Whether synthesis may replace this value with a mapping.
    ///
    /// Replacing an anchored value would leave its aliases dangling.
    #[must_use]
    pub fn is_promotable(&self) -> bool {
        self.style.is_promotable() && !self.is_anchored()
    }

    /// Source lines that belong to this value after the key line.
    #[must_use]
    pub fn continuation(&self) -> &[String] {
        &self.continuation
    }

    /// Best-effort decoded value for display.
    ///
    /// Returns `None` for an empty value. Quoted values are unescaped; block
    /// scalars and collections are returned as their source text.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        match self.style {
            ScalarStyle::Empty => None,
            ScalarStyle::Quoted if self.continuation.is_empty() => Some(
                serde_yaml::from_str::<String>(&self.raw).unwrap_or_else(|_| self.raw.clone()),
            ),
            ScalarStyle::Block => Some(
                self.continuation.iter().map(|line| line.trim()).collect::<Vec<_>>().join("\n"),
            ),
            _ if self.continuation.is_empty() => Some(self.raw.clone()),
            _ => {
                let mut lines = vec![self.raw.clone()];
                lines.extend(self.continuation.iter().map(|line| line.trim().to_string()));
                Some(lines.join("\n").trim().to_string())
            }
        }
    }
}

/// One `key: value` pair of a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub(crate) key: String,
    pub(crate) raw_key: String,
    pub(crate) indent: usize,
    pub(crate) head: String,
    pub(crate) comment: Option<String>,
    pub(crate) leading: Vec<String>,
    pub(crate) value: Node,
}

impl Entry {
    /// Build a freshly synthesized entry.
    pub(crate) fn synthesized(key: &str, indent: usize, value: Node) -> Self {
        let raw_key = format_key(key);
        Self {
            key: key.to_string(),
            head: format!("{}{raw_key}:", " ".repeat(indent)),
            raw_key,
            indent,
            comment: None,
            leading: Vec::new(),
            value,
        }
    }

    /// Build the linear chain `segments[0]: segments[1]: ... :` rooted at `indent`.
    ///
    /// Each segment wraps the next one; the last segment gets an empty value.
    pub(crate) fn chain(segments: &[String], indent: usize) -> Self {
        match segments {
            [] | [_] => Self::synthesized(
                segments.first().map_or("", String::as_str),
                indent,
                Node::Scalar(Scalar::empty()),
            ),
            [first, rest @ ..] => {
                let child_indent = indent + INDENT_STEP;
                let mut child = Mapping::with_indent(child_indent);
                child.entries.push(Self::chain(rest, child_indent));
                Self::synthesized(first, indent, Node::Mapping(child))
            }
        }
    }

    /// Replace this entry's scalar value with `mapping`, keeping the key.
    ///
    /// The key line is rewritten without the old value; a trailing comment on
    /// the key line survives. An empty value keeps its key line verbatim.
    pub(crate) fn promote(&mut self, mapping: Mapping) {
        let had_value = !matches!(&self.value, Node::Scalar(s) if s.style == ScalarStyle::Empty);
        if had_value {
            let mut head = format!("{}{}:", " ".repeat(self.indent), self.raw_key);
            if let Some(comment) = &self.comment {
                head.push(' ');
                head.push_str(comment);
            }
            self.head = head;
        }
        self.value = Node::Mapping(mapping);
    }

    /// The decoded key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value held by this entry.
    #[must_use]
    pub const fn value(&self) -> &Node {
        &self.value
    }

    /// Column (0-based) at which the key starts.
    #[must_use]
    pub const fn indent(&self) -> usize {
        self.indent
    }
}

/// An ordered block mapping. Keys are unique; order is source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mapping {
    pub(crate) indent: usize,
    pub(crate) entries: Vec<Entry>,
    pub(crate) trailer: Vec<String>,
    pub(crate) flow_placeholder: bool,
}

impl Mapping {
    /// An empty mapping whose entries will be written at `indent`.
    #[must_use]
    pub const fn with_indent(indent: usize) -> Self {
        Self {
            indent,
            entries: Vec::new(),
            trailer: Vec::new(),
            flow_placeholder: false,
        }
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Look up the entry stored under `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub(crate) fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indentation used for a new entry of this mapping.
    pub(crate) fn entry_indent(&self) -> usize {
        self.entries.first().map_or(self.indent, |entry| entry.indent)
    }

    /// Append `entry` after the last existing entry.
    ///
    /// In an empty mapping the comment-only content collected so far (for a
    /// document root: the marker comment) moves in front of the new entry, and
    /// a `{}` placeholder is dropped.
    pub(crate) fn append(&mut self, mut entry: Entry) {
        if self.entries.is_empty() {
            let mut trailer = std::mem::take(&mut self.trailer);
            if self.flow_placeholder {
                trailer.retain(|line| line.trim() != "{}");
                self.flow_placeholder = false;
            }
            trailer.append(&mut entry.leading);
            entry.leading = trailer;
        }
        self.entries.push(entry);
    }
}

/// Render a key for a synthesized entry, quoting it when YAML requires.
fn format_key(key: &str) -> String {
    serde_yaml::to_string(key)
        .ok()
        .map(|rendered| rendered.trim_end().to_string())
        .filter(|rendered| !rendered.is_empty() && !rendered.contains('\n'))
        .unwrap_or_else(|| format!("{key:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        path.split('.').map(str::to_string).collect()
    }

    #[test]
    fn test_chain_nests_each_segment() {
        let entry = Entry::chain(&segs("server.ssl.enabled"), 0);
        assert_eq!(entry.head, "server:");
        let ssl = entry.value.as_mapping().unwrap().entry("ssl").unwrap();
        assert_eq!(ssl.head, "  ssl:");
        let enabled = ssl.value.as_mapping().unwrap().entry("enabled").unwrap();
        assert_eq!(enabled.head, "    enabled:");
        assert_eq!(enabled.value, Node::Scalar(Scalar::empty()));
    }

    #[test]
    fn test_format_key_quotes_when_needed() {
        assert_eq!(format_key("server"), "server");
        assert_eq!(format_key("context-path"), "context-path");
        let quoted = format_key("a: b");
        assert!(quoted.starts_with('\'') || quoted.starts_with('"'), "{quoted}");
    }

    #[test]
    fn test_promote_keeps_comment_and_drops_value() {
        let mut entry = Entry {
            key: "port".to_string(),
            raw_key: "port".to_string(),
            indent: 2,
            head: "  port: 8080 # http".to_string(),
            comment: Some("# http".to_string()),
            leading: Vec::new(),
            value: Node::Scalar(Scalar {
                raw: "8080".to_string(),
                style: ScalarStyle::Plain,
                continuation: Vec::new(),
            }),
        };
        entry.promote(Mapping::with_indent(4));
        assert_eq!(entry.head, "  port: # http");
        assert!(entry.value.is_mapping());
    }

    #[test]
    fn test_scalar_value_decoding() {
        let quoted = Scalar {
            raw: "\"a\\tb\"".to_string(),
            style: ScalarStyle::Quoted,
            continuation: Vec::new(),
        };
        assert_eq!(quoted.value().as_deref(), Some("a\tb"));
        assert_eq!(Scalar::empty().value(), None);
        assert!(!ScalarStyle::Collection.is_promotable());
        assert!(ScalarStyle::Block.is_promotable());

        let anchored = Scalar {
            raw: "&port 8080".to_string(),
            style: ScalarStyle::Plain,
            continuation: Vec::new(),
        };
        assert!(anchored.is_anchored());
        assert!(!anchored.is_promotable());
    }
}
