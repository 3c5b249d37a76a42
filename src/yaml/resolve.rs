//! Key path lookup in the mapping tree.
//!
//! Lookups walk the lossless model first. Flow mappings and documents the
//! model cannot lay out are still resolvable through the `serde_yaml` value
//! tree built during validation; see [`resolve_value`].

use super::model::{Entry, Mapping, Node};
use crate::placeholder::KeyPath;
use serde_yaml::Value;

/// Outcome of walking a key path through a mapping tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Every segment matched; the node stored at the full path.
    Resolved(&'a Node),
    /// Every segment matched, at least one inside a flow collection or a
    /// document the model does not lay out.
    ResolvedValue(&'a Value),
    /// Segment at this index is missing, or its parent is not a mapping.
    UnresolvedAt(usize),
}

impl Resolution<'_> {
    /// Whether the path resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_) | Self::ResolvedValue(_))
    }
}

/// Walk `path` from `root`, matching each segment exactly.
///
/// A path ending on a mapping resolves as well; resolution never requires a
/// scalar leaf.
#[must_use]
pub fn resolve<'a>(root: &'a Mapping, path: &KeyPath) -> Resolution<'a> {
    match resolve_entry(root, path) {
        Ok(entry) => Resolution::Resolved(&entry.value),
        Err(index) => Resolution::UnresolvedAt(index),
    }
}

/// Like [`resolve`], returning the entry holding the final segment.
pub(crate) fn resolve_entry<'a>(root: &'a Mapping, path: &KeyPath) -> Result<&'a Entry, usize> {
    let mut current = root;
    let mut found = None;
    for (index, segment) in path.segments().iter().enumerate() {
        if index > 0 {
            current = found
                .and_then(|entry: &Entry| entry.value.as_mapping())
                .ok_or(index)?;
        }
        found = Some(current.entry(segment).ok_or(index)?);
    }
    found.ok_or(0)
}

/// The deepest entry of the model lying on `path`, if any.
///
/// For a path that leads into a flow collection this is the entry holding it.
pub(crate) fn deepest_entry<'a>(root: &'a Mapping, path: &KeyPath) -> Option<&'a Entry> {
    let mut current = Some(root);
    let mut found = None;
    for segment in path.segments() {
        let Some(entry) = current.and_then(|mapping| mapping.entry(segment)) else {
            break;
        };
        found = Some(entry);
        current = entry.value.as_mapping();
    }
    found
}

/// Walk `path` through a `serde_yaml` value tree.
///
/// Tags are looked through. String keys match exactly; number and boolean
/// keys match their canonical text.
#[must_use]
pub fn resolve_value<'a>(root: &'a Value, path: &KeyPath) -> Resolution<'a> {
    let mut current = root;
    for (index, segment) in path.segments().iter().enumerate() {
        let Some(mapping) = untagged(current).as_mapping() else {
            return Resolution::UnresolvedAt(index);
        };
        let Some((_, value)) = mapping.iter().find(|(key, _)| key_matches(key, segment)) else {
            return Resolution::UnresolvedAt(index);
        };
        current = value;
    }
    Resolution::ResolvedValue(current)
}

fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

fn key_matches(key: &Value, segment: &str) -> bool {
    match untagged(key) {
        Value::String(key) => key == segment,
        Value::Number(key) => key.to_string() == segment,
        Value::Bool(key) => key.to_string() == segment,
        _ => false,
    }
}
