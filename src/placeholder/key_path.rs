//! Dot-separated configuration key paths.

use crate::core::YamlBuddyError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An ordered, non-empty sequence of non-empty key segments.
///
/// Segments are compared exactly: no case folding, no trimming of individual
/// segments. `server.port` and `server. port` are different paths.
///
/// # Examples
///
/// ```rust
/// use yamlbuddy::placeholder::KeyPath;
///
/// let path = KeyPath::parse("server.port")?;
/// assert_eq!(path.segments(), ["server", "port"]);
/// assert_eq!(path.to_string(), "server.port");
///
/// assert!(KeyPath::parse("server..port").is_err());
/// assert!(KeyPath::parse("   ").is_err());
/// # Ok::<(), yamlbuddy::core::YamlBuddyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Parse a placeholder body into a key path.
    ///
    /// The body is trimmed and split on `.`.
    ///
    /// # Errors
    ///
    /// Returns [`YamlBuddyError::InvalidKeyPath`] when the trimmed body is empty
    /// or any segment is empty (`a..b`, `.a`, `a.`).
    pub fn parse(raw: &str) -> Result<Self, YamlBuddyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.split('.').any(str::is_empty) {
            return Err(YamlBuddyError::InvalidKeyPath {
                raw: raw.to_string(),
            });
        }

        Ok(Self {
            segments: trimmed.split('.').map(str::to_string).collect(),
        })
    }

    /// The path segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = YamlBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
