//! Key path synthesis: make a path exist while leaving everything else alone.
//!
//! Walking the path segment by segment, three cases can occur:
//!
//! 1. The segment is absent: the remaining segments are appended as a nested
//!    chain of new entries, the last one with an empty value.
//! 2. The segment holds a mapping: descend into it.
//! 3. The segment holds a scalar and more segments follow: the scalar is
//!    replaced by a mapping holding the remaining chain.
//!
//! Case 3 applies only to plain, quoted, block and empty values without an
//! anchor. A sequence, flow collection, alias or anchored value in the way is
//! reported as [`Synthesis::Conflict`] and nothing is changed.

use super::model::{Entry, Mapping, Node, Scalar};
use crate::constants::INDENT_STEP;
use crate::placeholder::KeyPath;
use serde::Serialize;

/// What [`ensure_path`] did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Synthesis {
    /// The full path already existed; the tree is unchanged.
    AlreadyPresent,
    /// Segments from index `at` onward were appended as new entries.
    Inserted { at: usize },
    /// The scalar at segment `at` was replaced by a mapping.
    Promoted { at: usize },
    /// Segment `at` holds a value that cannot become a mapping; unchanged.
    Conflict { at: usize },
    /// The document layout cannot be edited; unchanged.
    ReadOnly,
}

impl Synthesis {
    /// Whether the tree was modified.
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Inserted { .. } | Self::Promoted { .. })
    }
}

/// Ensure every segment of `path` exists in `root`.
///
/// Calling this twice with the same path changes nothing the second time.
pub fn ensure_path(root: &mut Mapping, path: &KeyPath) -> Synthesis {
    ensure_from(root, path.segments(), 0)
}

fn ensure_from(mapping: &mut Mapping, segments: &[String], depth: usize) -> Synthesis {
    let Some(position) = mapping.position(&segments[depth]) else {
        let indent = mapping.entry_indent();
        mapping.append(Entry::chain(&segments[depth..], indent));
        return Synthesis::Inserted { at: depth };
    };

    if depth + 1 == segments.len() {
        return Synthesis::AlreadyPresent;
    }

    let entry = &mut mapping.entries[position];
    if let Node::Mapping(child) = &mut entry.value {
        return ensure_from(child, segments, depth + 1);
    }

    let promotable = entry
        .value
        .as_scalar()
        .is_some_and(Scalar::is_promotable);
    if !promotable {
        return Synthesis::Conflict { at: depth };
    }

    let child_indent = entry.indent + INDENT_STEP;
    let mut child = Mapping::with_indent(child_indent);
    child
        .entries
        .push(Entry::chain(&segments[depth + 1..], child_indent));
    entry.promote(child);
    Synthesis::Promoted { at: depth }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::YamlDocument;

    fn ensure(text: &str, key: &str) -> (String, Synthesis) {
        let mut doc = YamlDocument::parse("application.yaml", text).unwrap();
        let outcome = doc.ensure_path(&KeyPath::parse(key).unwrap());
        (doc.render(), outcome)
    }

    #[test]
    fn test_insert_into_flow_placeholder_root() {
        let (text, outcome) = ensure("{}\n", "server.port");
        assert_eq!(text, "server:\n  port:\n");
        assert_eq!(outcome, Synthesis::Inserted { at: 0 });
    }

    #[test]
    fn test_promote_scalar_to_mapping() {
        let (text, outcome) = ensure("a:\n  b: 1\n", "a.b.c");
        assert_eq!(text, "a:\n  b:\n    c:\n");
        assert_eq!(outcome, Synthesis::Promoted { at: 1 });
    }

    #[test]
    fn test_existing_path_is_untouched() {
        let original = "x:\n  y: 5 # keep\n";
        let (text, outcome) = ensure(original, "x.y");
        assert_eq!(text, original);
        assert_eq!(outcome, Synthesis::AlreadyPresent);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_siblings_are_preserved() {
        let (text, _) = ensure("a: 1\nb: 2\n", "c.d");
        assert_eq!(text, "a: 1\nb: 2\nc:\n  d:\n");
    }

    #[test]
    fn test_insert_below_existing_mapping_uses_its_indent() {
        let original = "# app config\nserver:\n    port: 8080   # http\n\nspring:\n    name: demo\n";
        let (text, outcome) = ensure(original, "server.ssl.enabled");
        assert_eq!(
            text,
            "# app config\nserver:\n    port: 8080   # http\n    ssl:\n      enabled:\n\nspring:\n    name: demo\n"
        );
        assert_eq!(outcome, Synthesis::Inserted { at: 1 });
    }

    #[test]
    fn test_synthesis_is_idempotent() {
        let mut doc = YamlDocument::parse("application.yml", "a: 1\n").unwrap();
        let path = KeyPath::parse("b.c.d").unwrap();
        assert!(doc.ensure_path(&path).changed());
        let once = doc.render();
        assert_eq!(doc.ensure_path(&path), Synthesis::AlreadyPresent);
        assert_eq!(doc.render(), once);
        assert!(doc.resolve(&path).is_resolved());
    }

    #[test]
    fn test_sequence_in_the_way_is_a_conflict() {
        let original = "list:\n  - a\n  - b\n";
        let (text, outcome) = ensure(original, "list.item");
        assert_eq!(text, original);
        assert_eq!(outcome, Synthesis::Conflict { at: 0 });
    }

    #[test]
    fn test_marker_only_document_keeps_marker_first() {
        let (text, _) = ensure("# created by YAML Buddy\n", "app.name");
        assert_eq!(text, "# created by YAML Buddy\napp:\n  name:\n");
    }

    #[test]
    fn test_trailing_comments_stay_at_end() {
        let (text, _) = ensure("a: 1\n# end\n", "b");
        assert_eq!(text, "a: 1\nb:\n# end\n");
    }

    #[test]
    fn test_anchored_scalar_is_a_conflict() {
        let original = "a: &x 1\nb: *x\n";
        let (text, outcome) = ensure(original, "a.c");
        assert_eq!(text, original);
        assert_eq!(outcome, Synthesis::Conflict { at: 0 });
    }
}
