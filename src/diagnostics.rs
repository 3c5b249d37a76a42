//! Unresolved-key analysis for annotated string literals.
//!
//! The engine takes literals already extracted by the host (text, absolute
//! offset of the content, enclosing annotation) and never reads source files
//! itself. Literals under any other annotation produce no findings.
//!
//! Candidate documents are loaded at most once per [`DiagnosticEngine`], on
//! the first placeholder that needs them, so a pass over many literals reads
//! each document once. Create a new engine for each pass; nothing is cached
//! across engines.

use crate::config::Settings;
use crate::fix::CreateKeyFix;
use crate::locator::{self, DocumentLocator};
use crate::placeholder::{self, KeyPath, TextRange};
use crate::project::ProjectFiles;
use crate::yaml::YamlDocument;
use serde::Serialize;
use std::cell::OnceCell;
use tracing::trace;

/// A string literal as found in source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLiteral {
    /// Literal content between the quotes, undecoded
    pub text: String,
    /// Absolute offset of the first content character in the source file
    pub content_offset: usize,
    /// Fully-qualified name of the enclosing annotation, if any
    pub annotation: Option<String>,
}

/// An unresolved key reported for a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// The key that did not resolve
    pub key_path: KeyPath,
    /// Absolute range of the whole `${...}` placeholder
    pub range: TextRange,
    /// "key '<path>' not found"
    pub message: String,
    /// Always true
    pub fixable: bool,
    /// The fix creating the key
    pub fix: CreateKeyFix,
}

impl Finding {
    fn unresolved(key_path: KeyPath, range: TextRange) -> Self {
        Self {
            message: format!("key '{key_path}' not found"),
            fix: CreateKeyFix::new(key_path.clone()),
            fixable: true,
            key_path,
            range,
        }
    }
}

/// Analyzes literals against the project's configuration documents.
pub struct DiagnosticEngine<'a, P: ProjectFiles + ?Sized> {
    locator: DocumentLocator<'a, P>,
    annotation: &'a str,
    documents: OnceCell<Vec<YamlDocument>>,
}

impl<'a, P: ProjectFiles + ?Sized> DiagnosticEngine<'a, P> {
    /// Create an engine recognizing `settings.annotation`.
    pub fn new(project: &'a P, settings: &'a Settings) -> Self {
        Self {
            locator: DocumentLocator::new(project, settings),
            annotation: &settings.annotation,
            documents: OnceCell::new(),
        }
    }

    /// Findings for one literal, in placeholder order.
    pub fn analyze(&self, literal: &SourceLiteral) -> Vec<Finding> {
        if literal.annotation.as_deref() != Some(self.annotation) {
            return Vec::new();
        }
        if !placeholder::may_contain_placeholder(&literal.text) {
            return Vec::new();
        }

        placeholder::extract(&literal.text)
            .into_iter()
            .filter(|found| {
                let resolved = locator::find_in(self.documents(), &found.path).is_some();
                trace!("'{}' resolved: {resolved}", found.path);
                !resolved
            })
            .map(|found| {
                let range = found.absolute(literal.content_offset);
                Finding::unresolved(found.path, range)
            })
            .collect()
    }

    /// Findings for many literals, in input order.
    pub fn analyze_all<'l>(&self, literals: impl IntoIterator<Item = &'l SourceLiteral>) -> Vec<Finding> {
        literals.into_iter().flat_map(|literal| self.analyze(literal)).collect()
    }

    fn documents(&self) -> &[YamlDocument] {
        self.documents.get_or_init(|| self.locator.load_all())
    }
}
