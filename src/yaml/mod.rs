//! Structure-preserving YAML documents.
//!
//! [`YamlDocument`] wraps the lossless mapping model from [`model`] with the
//! operations the rest of the crate needs: parse, resolve a key path, ensure a
//! key path exists, locate an entry and render back to text.
//!
//! Only block-mapping documents are edited. Text is validated with
//! `serde_yaml` first, so a malformed file is reported as malformed rather
//! than guessed at, and a document whose root is a sequence or a scalar is
//! rejected with [`YamlBuddyError::NotAMapping`].
//!
//! # Example
//!
//! ```rust
//! use yamlbuddy::placeholder::KeyPath;
//! use yamlbuddy::yaml::YamlDocument;
//!
//! let mut doc = YamlDocument::parse("application.yml", "server:\n  port: 8080 # http\n")?;
//! let path = KeyPath::parse("server.ssl.enabled")?;
//! assert!(!doc.resolve(&path).is_resolved());
//!
//! doc.ensure_path(&path);
//! assert_eq!(doc.render(), "server:\n  port: 8080 # http\n  ssl:\n    enabled:\n");
//! # Ok::<(), yamlbuddy::core::YamlBuddyError>(())
//! ```

pub mod model;
mod parser;
pub mod resolve;
pub mod synthesize;

pub use model::{Entry, Mapping, Node, Scalar, ScalarStyle};
pub use resolve::Resolution;
pub use synthesize::Synthesis;

use crate::core::YamlBuddyError;
use crate::placeholder::KeyPath;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A 1-based line and column inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A parsed YAML document that renders back to its source text.
///
/// Documents outside the block-mapping layout the editor models (a flow
/// mapping root, complex keys) still load: they resolve through their
/// `serde_yaml` value but are read-only, and synthesis reports
/// [`Synthesis::ReadOnly`].
#[derive(Debug, Clone)]
pub struct YamlDocument {
    path: PathBuf,
    root: Mapping,
    value: serde_yaml::Value,
    layout: Layout,
    bom: bool,
    line_ending: &'static str,
    final_newline: bool,
    modified: bool,
}

#[derive(Debug, Clone)]
enum Layout {
    Editable,
    ReadOnly { source: String },
}

impl YamlDocument {
    /// Parse `text` read from `path`.
    ///
    /// A leading byte order mark is kept aside and written back by
    /// [`render`](Self::render).
    ///
    /// # Errors
    ///
    /// - [`YamlBuddyError::MalformedDocument`] if the text is not valid YAML
    /// - [`YamlBuddyError::NotAMapping`] if the root is not a mapping
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Result<Self, YamlBuddyError> {
        let path = path.into();
        let shown = path.display().to_string();

        let (bom, text) = match text.strip_prefix('\u{feff}') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let mut raw_lines: Vec<&str> = text.split('\n').collect();
        let final_newline = text.ends_with('\n');
        if final_newline {
            raw_lines.pop();
        }
        if text.is_empty() {
            raw_lines.clear();
        }

        let crlf = raw_lines.iter().any(|line| line.ends_with('\r'));
        let lines: Vec<&str> =
            raw_lines.iter().map(|line| line.strip_suffix('\r').unwrap_or(*line)).collect();

        let value = if lines.iter().all(|line| parser::is_trivia(line)) {
            serde_yaml::Value::Null
        } else {
            validate(&shown, text)?
        };

        let (root, layout) = match parser::parse_lines(&lines, &shown) {
            Ok(root) => (root, Layout::Editable),
            Err(e) => {
                debug!("Loading {shown} read-only: {e}");
                (
                    Mapping::default(),
                    Layout::ReadOnly {
                        source: text.to_string(),
                    },
                )
            }
        };
        trace!("Parsed {} with {} top-level keys", shown, root.len());

        Ok(Self {
            path,
            root,
            value,
            layout,
            bom,
            line_ending: if crlf { "\r\n" } else { "\n" },
            final_newline,
            modified: false,
        })
    }

    /// An empty document for `path`.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: Mapping::default(),
            value: serde_yaml::Value::Null,
            layout: Layout::Editable,
            bom: false,
            line_ending: "\n",
            final_newline: true,
            modified: false,
        }
    }

    /// The file this document was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The root mapping. Empty for a read-only document.
    #[must_use]
    pub const fn root(&self) -> &Mapping {
        &self.root
    }

    /// Whether [`ensure_path`](Self::ensure_path) can edit this document.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        matches!(self.layout, Layout::Editable)
    }

    /// Resolve `path` against the document.
    ///
    /// The model is tried first; a path it cannot follow (into a flow
    /// collection, or in a read-only document) is looked up in the value tree.
    #[must_use]
    pub fn resolve(&self, path: &KeyPath) -> Resolution<'_> {
        let found = resolve::resolve(&self.root, path);
        if found.is_resolved() {
            return found;
        }
        // Synthesis only adds keys, so the value tree never holds a key the
        // model lost.
        resolve::resolve_value(&self.value, path)
    }

    /// Make sure `path` exists, synthesizing whatever is missing.
    pub fn ensure_path(&mut self, path: &KeyPath) -> Synthesis {
        if self.resolve(path).is_resolved() {
            return Synthesis::AlreadyPresent;
        }
        if !self.is_editable() {
            return Synthesis::ReadOnly;
        }

        let outcome = synthesize::ensure_path(&mut self.root, path);
        if outcome.changed() {
            self.modified = true;
            self.final_newline = true;
        }
        outcome
    }

    /// Whether [`ensure_path`](Self::ensure_path) changed the document.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Render the document. An unmodified document renders to its source text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = String::new();
        if self.bom {
            text.push('\u{feff}');
        }

        if let Layout::ReadOnly { source } = &self.layout {
            text.push_str(source);
            return text;
        }

        let mut lines = Vec::new();
        collect_lines(&self.root, &mut lines);
        text.push_str(&lines.join(self.line_ending));
        if self.final_newline && !lines.is_empty() {
            text.push_str(self.line_ending);
        }
        text
    }

    /// Position of the key holding the last segment of `path`, if it resolves.
    ///
    /// A key inside a flow collection is reported at the entry holding the
    /// collection; in a read-only document at the start of the document.
    #[must_use]
    pub fn locate(&self, path: &KeyPath) -> Option<Position> {
        if !self.resolve(path).is_resolved() {
            return None;
        }

        let Some(target) = resolve::deepest_entry(&self.root, path) else {
            return Some(Position { line: 1, column: 1 });
        };
        let mut line = 0;
        find_line(&self.root, target, &mut line).then(|| Position {
            line,
            column: target.indent + 1,
        })
    }
}

fn validate(path: &str, text: &str) -> Result<serde_yaml::Value, YamlBuddyError> {
    match serde_yaml::from_str::<serde_yaml::Value>(text) {
        Ok(value @ (serde_yaml::Value::Mapping(_) | serde_yaml::Value::Null)) => Ok(value),
        Ok(_) => Err(YamlBuddyError::NotAMapping {
            path: path.to_string(),
        }),
        Err(e) => Err(YamlBuddyError::MalformedDocument {
            path: path.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn collect_lines<'a>(mapping: &'a Mapping, out: &mut Vec<&'a str>) {
    for entry in &mapping.entries {
        out.extend(entry.leading.iter().map(String::as_str));
        out.push(&entry.head);
        match &entry.value {
            Node::Scalar(scalar) => out.extend(scalar.continuation.iter().map(String::as_str)),
            Node::Mapping(child) => collect_lines(child, out),
        }
    }
    out.extend(mapping.trailer.iter().map(String::as_str));
}

/// Advance `line` through the rendered layout until `target`'s key line.
fn find_line(mapping: &Mapping, target: &Entry, line: &mut usize) -> bool {
    for entry in &mapping.entries {
        *line += entry.leading.len() + 1;
        if std::ptr::eq(entry, target) {
            return true;
        }
        match &entry.value {
            Node::Scalar(scalar) => *line += scalar.continuation.len(),
            Node::Mapping(child) => {
                if find_line(child, target, line) {
                    return true;
                }
            }
        }
    }
    *line += mapping.trailer.len();
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> KeyPath {
        KeyPath::parse(raw).unwrap()
    }

    #[test]
    fn test_unmodified_document_round_trips() {
        let sources = [
            "",
            "# only a comment",
            "{}\n",
            "---\nserver:\n  port: 8080 # http\n\n  host: \"local\\thost\"\n...\n",
            "a: 1\r\nb:\r\n  c: [1, 2]\r\n",
            "script: |\n  echo a\n\n  echo b\nlist:\n- x\n- y\nlast: 'q' # t",
            "\u{feff}server:\n  port: 8080\n",
            "{server: {port: 8080}}\n",
            "a:\n  hello\nb: 1\n",
        ];
        for source in sources {
            let doc = YamlDocument::parse("application.yml", source).unwrap();
            assert_eq!(doc.render(), source);
            assert!(!doc.is_modified());
        }
    }

    #[test]
    fn test_crlf_is_kept_for_new_lines() {
        let mut doc = YamlDocument::parse("application.yml", "a: 1\r\n").unwrap();
        doc.ensure_path(&path("b.c"));
        assert_eq!(doc.render(), "a: 1\r\nb:\r\n  c:\r\n");
    }

    #[test]
    fn test_missing_final_newline_is_added_on_change() {
        let mut doc = YamlDocument::parse("application.yml", "a: 1").unwrap();
        assert_eq!(doc.render(), "a: 1");
        doc.ensure_path(&path("b"));
        assert_eq!(doc.render(), "a: 1\nb:\n");
    }

    #[test]
    fn test_empty_document_synthesis() {
        let mut doc = YamlDocument::empty("application.yaml");
        assert_eq!(doc.render(), "");
        doc.ensure_path(&path("server.port"));
        assert_eq!(doc.render(), "server:\n  port:\n");
    }

    #[test]
    fn test_rejects_malformed_and_non_mapping() {
        let err = YamlDocument::parse("a.yml", "key: [unclosed\n").unwrap_err();
        assert!(matches!(err, YamlBuddyError::MalformedDocument { .. }));

        let err = YamlDocument::parse("a.yml", "- one\n- two\n").unwrap_err();
        assert!(matches!(err, YamlBuddyError::NotAMapping { .. }));

        let err = YamlDocument::parse("a.yml", "just text\n").unwrap_err();
        assert!(matches!(err, YamlBuddyError::NotAMapping { .. }));
    }

    #[test]
    fn test_locate_reports_key_line_and_column() {
        let doc = YamlDocument::parse(
            "application.yml",
            "# head\nserver:\n  port: 8080\n  ssl:\n    enabled: true\nname: x\n",
        )
        .unwrap();
        assert_eq!(doc.locate(&path("server")), Some(Position { line: 2, column: 1 }));
        assert_eq!(doc.locate(&path("server.ssl.enabled")), Some(Position { line: 5, column: 5 }));
        assert_eq!(doc.locate(&path("name")), Some(Position { line: 6, column: 1 }));
        assert_eq!(doc.locate(&path("missing")), None);
    }

    #[test]
    fn test_locate_after_synthesis() {
        let mut doc = YamlDocument::parse("application.yml", "# created by YAML Buddy\n").unwrap();
        doc.ensure_path(&path("app.name"));
        assert_eq!(doc.locate(&path("app.name")), Some(Position { line: 3, column: 3 }));
    }

    #[test]
    fn test_byte_order_mark_is_not_part_of_the_first_key() {
        let mut doc = YamlDocument::parse("application.yml", "\u{feff}server:\n  port: 8080\n").unwrap();
        assert!(doc.resolve(&path("server.port")).is_resolved());
        assert_eq!(doc.locate(&path("server.port")), Some(Position { line: 2, column: 3 }));

        assert_eq!(doc.ensure_path(&path("server.port")), Synthesis::AlreadyPresent);
        doc.ensure_path(&path("server.host"));
        assert_eq!(doc.render(), "\u{feff}server:\n  port: 8080\n  host:\n");
    }

    #[test]
    fn test_flow_mapping_value_resolves_but_is_not_edited() {
        let original = "logging: {level: INFO}\nname: x\n";
        let mut doc = YamlDocument::parse("application.yml", original).unwrap();
        assert!(doc.is_editable());
        assert!(doc.resolve(&path("logging.level")).is_resolved());
        assert!(!doc.resolve(&path("logging.file")).is_resolved());
        // Reported at the entry holding the flow mapping.
        assert_eq!(doc.locate(&path("logging.level")), Some(Position { line: 1, column: 1 }));

        assert_eq!(doc.ensure_path(&path("logging.level")), Synthesis::AlreadyPresent);
        assert_eq!(doc.ensure_path(&path("logging.file")), Synthesis::Conflict { at: 0 });
        assert_eq!(doc.render(), original);
    }

    #[test]
    fn test_flow_mapping_root_is_read_only() {
        let original = "{server: {port: 8080}}\n";
        let mut doc = YamlDocument::parse("application.yml", original).unwrap();
        assert!(!doc.is_editable());
        assert!(doc.resolve(&path("server.port")).is_resolved());
        assert_eq!(doc.locate(&path("server.port")), Some(Position { line: 1, column: 1 }));
        assert_eq!(doc.locate(&path("server.host")), None);

        assert_eq!(doc.ensure_path(&path("server.host")), Synthesis::ReadOnly);
        assert!(!doc.is_modified());
        assert_eq!(doc.render(), original);
    }

    #[test]
    fn test_scalar_on_next_line_resolves_and_promotes() {
        let mut doc = YamlDocument::parse("application.yml", "a:\n  hello\nb: 1\n").unwrap();
        assert!(doc.resolve(&path("a")).is_resolved());
        assert!(doc.resolve(&path("b")).is_resolved());
        assert_eq!(doc.ensure_path(&path("a.c")), Synthesis::Promoted { at: 0 });
        assert_eq!(doc.render(), "a:\n  c:\nb: 1\n");
    }
}
