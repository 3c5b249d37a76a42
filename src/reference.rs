//! Navigable references from placeholders to YAML keys.
//!
//! Each placeholder in an annotated literal is a [`KeyReference`]. Resolving
//! one gives the declaration site of the key ("go to declaration"). Renaming
//! through a reference is rejected: the key text lives in YAML documents and
//! possibly in several literals, so a rename here would leave them out of sync.

use crate::core::YamlBuddyError;
use crate::diagnostics::SourceLiteral;
use crate::locator::{DocumentLocator, KeyLocation};
use crate::placeholder::{self, KeyPath, TextRange};
use crate::project::ProjectFiles;

/// A reference from a placeholder to the key it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReference {
    key_path: KeyPath,
    range: TextRange,
}

impl KeyReference {
    /// Create a reference to `key_path` covering `range`.
    #[must_use]
    pub const fn new(key_path: KeyPath, range: TextRange) -> Self {
        Self { key_path, range }
    }

    /// One reference per placeholder of `literal`, in placeholder order.
    ///
    /// Unlike analysis, no annotation filtering happens here; the caller
    /// decides which literals take part.
    #[must_use]
    pub fn references_in(literal: &SourceLiteral) -> Vec<Self> {
        placeholder::extract(&literal.text)
            .into_iter()
            .map(|found| {
                let range = found.absolute(literal.content_offset);
                Self::new(found.path, range)
            })
            .collect()
    }

    /// The referenced key.
    #[must_use]
    pub const fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    /// Absolute range of the placeholder.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    /// Where the key is declared, probing candidates in rank order.
    pub fn resolve<P: ProjectFiles + ?Sized>(
        &self,
        locator: &DocumentLocator<'_, P>,
    ) -> Option<KeyLocation> {
        locator.find_key(&self.key_path)
    }

    /// Completion variants. None are offered.
    #[must_use]
    pub fn variants(&self) -> Vec<String> {
        Vec::new()
    }

    /// Rename the referenced key.
    ///
    /// # Errors
    ///
    /// Always returns [`YamlBuddyError::UnsupportedOperation`].
    pub fn rename(&self, new_name: &str) -> Result<(), YamlBuddyError> {
        Err(YamlBuddyError::UnsupportedOperation {
            operation: format!("renaming YAML key '{}' to '{new_name}'", self.key_path),
        })
    }

    /// Message shown when [`resolve`](Self::resolve) finds nothing.
    #[must_use]
    pub fn unresolved_message(&self) -> String {
        format!("YAML key '{}' not found", self.key_path)
    }
}
