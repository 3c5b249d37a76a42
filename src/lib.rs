//! YAML Buddy - configuration key checking for annotated source literals
//!
//! YAML Buddy finds `${a.b.c}` placeholders in string literals bound to a
//! configured annotation (by default Spring's `@Value`), resolves each key
//! against the project's `application.yml` / `application.yaml` documents,
//! reports keys that resolve nowhere, and creates missing keys in the best
//! ranked document while keeping everything else in it as written.
//!
//! # Architecture Overview
//!
//! ```text
//!  source literal ──► placeholder ──► diagnostics ──► Finding ──► fix
//!                                         │                        │
//!                                         ▼                        ▼
//!                                      locator ◄──── project ◄── yaml (resolve / synthesize)
//! ```
//!
//! - [`placeholder`] extracts `${...}` markers and parses them into [`placeholder::KeyPath`]s
//! - [`yaml`] holds a lossless model of block-mapping YAML documents, with
//!   key resolution and key synthesis
//! - [`locator`] discovers candidate documents, ranks them and creates one
//!   when none exists
//! - [`diagnostics`] turns unresolved placeholders into findings
//! - [`fix`] applies the "create key" fix
//! - [`reference`] offers placeholder-to-key navigation
//! - [`project`] abstracts file access, with locking for edits
//! - [`source`] extracts annotated literals from Java source text
//! - [`cli`] is the command line surface
//!
//! The core is synchronous and holds no state between calls. Async code is
//! confined to the command line layer.
//!
//! # Example
//!
//! ```rust
//! use yamlbuddy::placeholder::extract;
//! use yamlbuddy::yaml::YamlDocument;
//!
//! let mut doc = YamlDocument::parse("application.yml", "server:\n  port: 8080\n")?;
//! let missing: Vec<_> = extract("${server.port}:${server.host}")
//!     .into_iter()
//!     .filter(|found| !doc.resolve(&found.path).is_resolved())
//!     .collect();
//! assert_eq!(missing.len(), 1);
//!
//! doc.ensure_path(&missing[0].path);
//! assert_eq!(doc.render(), "server:\n  port: 8080\n  host:\n");
//! # Ok::<(), yamlbuddy::core::YamlBuddyError>(())
//! ```

// Core functionality modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Analysis and editing
pub mod diagnostics;
pub mod fix;
pub mod locator;
pub mod placeholder;
pub mod reference;
pub mod yaml;

// Supporting modules
pub mod project;
pub mod source;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
