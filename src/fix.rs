//! Key creation: the fix for an unresolved key.
//!
//! [`FixExecutor::apply`] is the single code path that edits a configuration
//! document. It picks the target document (creating one if needed), takes the
//! project's edit lock, synthesizes the key path and writes the result back.
//! Any failure along the way makes the fix unavailable (`None`); nothing is
//! raised to the caller. A document that cannot be parsed is never
//! rewritten, and neither is one whose edited text would not parse again.
//!
//! [`CreateKeyFix`] is the descriptor handed to reporting code. Its two entry
//! points, [`apply_fix`](CreateKeyFix::apply_fix) for a problem-list quick fix
//! and [`invoke`](CreateKeyFix::invoke) for an explicit user action, both end
//! up in the executor.

use crate::config::Settings;
use crate::constants::{DEFAULT_CREATE_FILE, FIX_FAMILY};
use crate::locator::{DocumentLocator, KeyLocation};
use crate::placeholder::KeyPath;
use crate::project::ProjectFiles;
use crate::yaml::{Synthesis, YamlDocument};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::path::Path;
use tracing::{debug, info, warn};

/// Applies "create key" fixes to a project.
pub struct FixExecutor<'a, P: ProjectFiles + ?Sized> {
    locator: DocumentLocator<'a, P>,
}

impl<'a, P: ProjectFiles + ?Sized> FixExecutor<'a, P> {
    /// Create an executor over `project`.
    pub const fn new(project: &'a P, settings: &'a Settings) -> Self {
        Self {
            locator: DocumentLocator::new(project, settings),
        }
    }

    /// Make `key` exist in the target document.
    ///
    /// Returns the location of the key afterwards, or `None` when the fix is
    /// unavailable: no project root, the document cannot be created, read,
    /// parsed or written, its layout is read-only, or a sequence, flow
    /// collection, alias or anchored value blocks the path.
    pub fn apply(&self, key: &KeyPath) -> Option<KeyLocation> {
        let Some(path) = self.locator.choose_or_create() else {
            debug!("No target document for '{key}', fix unavailable");
            return None;
        };

        let project = self.locator.project();
        let _lock = match project.lock_for_edit(&path) {
            Ok(lock) => lock,
            Err(e) => {
                warn!("Failed to lock {}: {e:#}", path.display());
                return None;
            }
        };

        let mut doc = load(project, &path)?;
        match doc.ensure_path(key) {
            Synthesis::AlreadyPresent => debug!("'{key}' already present in {}", path.display()),
            Synthesis::Conflict { at } => {
                warn!(
                    "Cannot create '{key}' in {}: segment '{}' does not hold a mapping",
                    path.display(),
                    key.segments()[at]
                );
                return None;
            }
            Synthesis::ReadOnly => {
                warn!("Cannot create '{key}' in {}: document layout is not editable", path.display());
                return None;
            }
            Synthesis::Inserted { .. } | Synthesis::Promoted { .. } => {
                let rendered = doc.render();
                if let Err(e) = YamlDocument::parse(&path, &rendered) {
                    warn!("Not writing {}: edit would produce an invalid document: {e}", path.display());
                    return None;
                }
                if let Err(e) = project.write(&path, &rendered) {
                    warn!("Failed to write {}: {e:#}", path.display());
                    return None;
                }
                info!("Created key '{key}' in {}", path.display());
            }
        }

        doc.locate(key).map(|position| KeyLocation::new(&path, position))
    }
}

fn load<P: ProjectFiles + ?Sized>(project: &P, path: &Path) -> Option<YamlDocument> {
    let text = project
        .read(path)
        .map_err(|e| warn!("Failed to read {}: {e:#}", path.display()))
        .ok()?;
    YamlDocument::parse(path, &text)
        .map_err(|e| warn!("Not editing {}: {e}", path.display()))
        .ok()
}

/// Descriptor of the fix offered for one unresolved key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateKeyFix {
    key_path: KeyPath,
}

impl CreateKeyFix {
    /// A fix creating `key_path`.
    #[must_use]
    pub const fn new(key_path: KeyPath) -> Self {
        Self { key_path }
    }

    /// The key path this fix creates.
    #[must_use]
    pub const fn key_path(&self) -> &KeyPath {
        &self.key_path
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Create key '{}' in {DEFAULT_CREATE_FILE}", self.key_path)
    }

    /// Stable family identifier grouping all fixes of this kind.
    #[must_use]
    pub const fn family(&self) -> &'static str {
        FIX_FAMILY
    }

    /// Problem-list entry point.
    pub fn apply_fix<P: ProjectFiles + ?Sized>(
        &self,
        executor: &FixExecutor<'_, P>,
    ) -> Option<KeyLocation> {
        executor.apply(&self.key_path)
    }

    /// Explicit user action entry point.
    pub fn invoke<P: ProjectFiles + ?Sized>(
        &self,
        executor: &FixExecutor<'_, P>,
    ) -> Option<KeyLocation> {
        executor.apply(&self.key_path)
    }

    /// Always true; whether the fix can actually run is decided by [`FixExecutor::apply`].
    #[must_use]
    pub const fn is_available(&self) -> bool {
        true
    }
}

impl Serialize for CreateKeyFix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CreateKeyFix", 3)?;
        state.serialize_field("key_path", &self.key_path)?;
        state.serialize_field("label", &self.label())?;
        state.serialize_field("family", self.family())?;
        state.end()
    }
}
