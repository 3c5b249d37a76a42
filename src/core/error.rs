//! Error handling for YAML Buddy
//!
//! This module provides the error types and user-friendly error reporting for
//! YAML Buddy. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling inside the library
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`YamlBuddyError`] - Enumerated error types for every failure case
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! Most failures inside the core never reach a caller: the document locator
//! and the fix executor absorb them into an "unavailable" outcome. The one
//! deliberate hard failure is [`YamlBuddyError::UnsupportedOperation`], which
//! signals a programming misuse such as renaming a key reference.
//!
//! # Examples
//!
//! ```rust,no_run
//! use yamlbuddy::core::{YamlBuddyError, user_friendly_error};
//!
//! let error = YamlBuddyError::ProjectRootUnavailable;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for YAML Buddy operations.
///
/// # Error Categories
///
/// ## Documents
/// - [`MalformedDocument`] - The text is not valid single-document YAML
/// - [`NotAMapping`] - The document root is a sequence or a scalar
/// - [`UnsupportedDocument`] - Valid YAML using a construct the editor cannot model
///
/// ## Keys and references
/// - [`InvalidKeyPath`] - Empty path or empty segment
/// - [`UnsupportedOperation`] - Operation rejected by design (rename)
///
/// ## Project and configuration
/// - [`ProjectRootUnavailable`] - No project root to create a document under
/// - [`ConfigParseError`] - `yamlbuddy.toml` could not be parsed
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
///
/// [`MalformedDocument`]: YamlBuddyError::MalformedDocument
/// [`NotAMapping`]: YamlBuddyError::NotAMapping
/// [`UnsupportedDocument`]: YamlBuddyError::UnsupportedDocument
/// [`InvalidKeyPath`]: YamlBuddyError::InvalidKeyPath
/// [`UnsupportedOperation`]: YamlBuddyError::UnsupportedOperation
/// [`ProjectRootUnavailable`]: YamlBuddyError::ProjectRootUnavailable
/// [`ConfigParseError`]: YamlBuddyError::ConfigParseError
/// [`IoError`]: YamlBuddyError::IoError
#[derive(Error, Debug)]
pub enum YamlBuddyError {
    /// The document text is not valid YAML, or holds more than one document.
    #[error("Malformed YAML document {path}: {reason}")]
    MalformedDocument {
        /// Path of the offending document
        path: String,
        /// Parser message
        reason: String,
    },

    /// The document root is neither a mapping nor empty.
    #[error("YAML document {path} does not have a mapping at its root")]
    NotAMapping {
        /// Path of the offending document
        path: String,
    },

    /// The document uses a construct the structural editor does not model.
    #[error("Unsupported YAML construct in {path} at line {line}: {reason}")]
    UnsupportedDocument {
        /// Path of the offending document
        path: String,
        /// 1-based line number of the construct
        line: usize,
        /// What was found
        reason: String,
    },

    /// A key path with no segments or with an empty segment.
    #[error("Invalid key path '{raw}'")]
    InvalidKeyPath {
        /// The text the path was parsed from
        raw: String,
    },

    /// An operation that is rejected on purpose.
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Description of the rejected operation
        operation: String,
    },

    /// The project root cannot be determined.
    #[error("Project root is unavailable")]
    ProjectRootUnavailable,

    /// The project configuration file could not be parsed.
    #[error("Failed to parse configuration {file}: {reason}")]
    ConfigParseError {
        /// Path of the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Standard I/O failure.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Error wrapper carrying user-facing details and a suggestion.
///
/// Built by [`user_friendly_error`] at the CLI boundary and printed with
/// [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The main error message
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`YamlBuddyError`] variants anywhere in the error chain and a
/// top-level [`std::io::Error`]; everything else is shown with its full
/// context chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(yb_error) = cause.downcast_ref::<YamlBuddyError>() {
            return create_error_context(yb_error, &error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(format!("{error:#}"))
                    .with_suggestion("Check file ownership and permissions of the project directory")
                    .with_details("YAML Buddy needs to read sources and write configuration documents");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(format!("{error:#}"))
                    .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    ErrorContext::new(format!("{error:#}"))
}

fn create_error_context(error: &YamlBuddyError, full: &anyhow::Error) -> ErrorContext {
    let ctx = ErrorContext::new(format!("{full:#}"));
    match error {
        YamlBuddyError::MalformedDocument { .. } | YamlBuddyError::NotAMapping { .. } => ctx
            .with_suggestion("Fix the YAML syntax of the configuration document; YAML Buddy never rewrites a document it cannot parse")
            .with_details("Only single-document YAML files with a mapping at the root are supported"),
        YamlBuddyError::UnsupportedDocument { .. } => ctx
            .with_suggestion("Rewrite the reported construct in block style (key: value with indentation)"),
        YamlBuddyError::InvalidKeyPath { .. } => ctx
            .with_suggestion("Key paths are dot-separated and every segment must be non-empty, e.g. server.port"),
        YamlBuddyError::UnsupportedOperation { .. } => ctx
            .with_details("Key paths are derived text, not renameable symbols"),
        YamlBuddyError::ProjectRootUnavailable => ctx
            .with_suggestion("Run inside the project or pass --project <DIR>"),
        YamlBuddyError::ConfigParseError { .. } => ctx
            .with_suggestion("Check the TOML syntax of yamlbuddy.toml. Verify quotes and brackets")
            .with_details("Only the keys annotation, candidates, create_file, resources_dir, marker, sources and exclude are recognized"),
        YamlBuddyError::IoError(_) => ctx,
    }
}
