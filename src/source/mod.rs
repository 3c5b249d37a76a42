//! Source-side collaborators for the command line.
//!
//! The analysis core only sees [`SourceLiteral`] values. This module produces
//! them from Java source text and maps their offsets back to line/column
//! positions for reporting.

mod java;
mod line_index;

pub use java::{AnnotatedLiteral, scan_java};
pub use line_index::LineIndex;

use crate::diagnostics::SourceLiteral;

impl From<AnnotatedLiteral> for SourceLiteral {
    fn from(literal: AnnotatedLiteral) -> Self {
        Self {
            text: literal.text,
            content_offset: literal.content_offset,
            annotation: Some(literal.annotation),
        }
    }
}
