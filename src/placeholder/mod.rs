//! Placeholder extraction from string literal content.
//!
//! A placeholder is a `${...}` marker inside a string literal naming a
//! configuration key, e.g. `"${server.port}"` or `"http://${app.host}:${app.port}/"`.
//! This module scans literal content for placeholders and turns each body into
//! a [`KeyPath`].
//!
//! # Extraction Rules
//!
//! - The pattern is `$` `{` optional whitespace, one or more non-`}`
//!   characters, optional whitespace, `}`
//! - The body is trimmed; an empty body (`${ }`) is skipped silently
//! - A body that is not a valid key path (`${a..b}`) is skipped silently
//! - Matches never overlap and are returned left to right
//!
//! Offsets are byte offsets into the literal *content* (the text between the
//! quote delimiters). [`PlaceholderMatch::absolute`] translates them into the
//! coordinate space of the enclosing source file.
//!
//! # Usage
//!
//! ```rust
//! use yamlbuddy::placeholder::extract;
//!
//! let matches = extract("jdbc:${db.host}:${ db.port }");
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].path.to_string(), "db.host");
//! assert_eq!((matches[0].start, matches[0].end), (5, 15));
//! assert_eq!(matches[1].path.to_string(), "db.port");
//! ```

pub mod key_path;

pub use key_path::KeyPath;

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*([^}]+)\s*\}").expect("placeholder pattern is a valid regex")
});

/// A half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextRange {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl TextRange {
    /// Create a range from its bounds.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Shift both bounds by `offset`.
    #[must_use]
    pub const fn shifted(&self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// One placeholder found in literal content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch {
    /// The key path named by the placeholder
    pub path: KeyPath,
    /// Offset of the `$` relative to the literal content
    pub start: usize,
    /// Offset just past the closing `}` relative to the literal content
    pub end: usize,
}

impl PlaceholderMatch {
    /// The placeholder range relative to the literal content.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// The placeholder range in file coordinates.
    ///
    /// `content_offset` is the absolute offset of the first content character,
    /// i.e. the offset of the opening quote plus one.
    #[must_use]
    pub const fn absolute(&self, content_offset: usize) -> TextRange {
        self.range().shifted(content_offset)
    }
}

/// Extract every valid placeholder from literal content, left to right.
///
/// Empty and invalid placeholder bodies are skipped without error.
///
/// # Examples
///
/// ```rust
/// use yamlbuddy::placeholder::extract;
///
/// assert!(extract("${ }").is_empty());
/// assert!(extract("no placeholders here").is_empty());
/// assert_eq!(extract("${a.b}")[0].path.segments(), ["a", "b"]);
/// ```
#[must_use]
pub fn extract(literal: &str) -> Vec<PlaceholderMatch> {
    PLACEHOLDER
        .captures_iter(literal)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let body = cap.get(1)?.as_str();
            let path = KeyPath::parse(body).ok()?;
            Some(PlaceholderMatch {
                path,
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Cheap pre-check used before running the full scan.
#[must_use]
pub fn may_contain_placeholder(literal: &str) -> bool {
    literal.contains("${") && literal.contains('}')
}
