//! Configuration document discovery and ranking.
//!
//! Every file named like a candidate (`application.yml`, `application.yaml`)
//! anywhere under the project root is a candidate document. Candidates are
//! ranked by where they live:
//!
//! | Rank | Location                                  |
//! |------|-------------------------------------------|
//! | 0    | inside `src/main/resources`               |
//! | 1    | inside any other `resources` directory    |
//! | 2    | anywhere else                             |
//!
//! Ties keep discovery order, which is file-name order of the walk. Lookups
//! probe candidates in rank order and stop at the first document holding the
//! key. When no candidate exists, [`DocumentLocator::choose_or_create`] creates
//! one under the resources directory.

use crate::config::Settings;
use crate::core::YamlBuddyError;
use crate::placeholder::KeyPath;
use crate::project::ProjectFiles;
use crate::yaml::{Position, YamlDocument};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a key was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyLocation {
    /// Document holding the key
    pub file: PathBuf,
    /// 1-based line of the key holding the last segment
    pub line: usize,
    /// 1-based column of that key
    pub column: usize,
}

impl KeyLocation {
    pub(crate) fn new(file: &Path, position: Position) -> Self {
        Self {
            file: file.to_path_buf(),
            line: position.line,
            column: position.column,
        }
    }
}

/// Rank of a document path; lower is preferred.
///
/// `path` is interpreted relative to `root` when it lies under it.
#[must_use]
pub fn specificity(path: &Path, root: Option<&Path>) -> u8 {
    let relative = root.and_then(|root| path.strip_prefix(root).ok()).unwrap_or(path);
    let dirs: Vec<&str> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(name) => name.to_str(),
            _ => None,
        })
        .collect();

    if dirs.windows(3).any(|w| w == ["src", "main", "resources"]) {
        0
    } else if dirs.contains(&"resources") {
        1
    } else {
        2
    }
}

/// Finds, ranks, loads and creates configuration documents.
pub struct DocumentLocator<'a, P: ProjectFiles + ?Sized> {
    project: &'a P,
    settings: &'a Settings,
}

impl<'a, P: ProjectFiles + ?Sized> DocumentLocator<'a, P> {
    /// Create a locator over `project` using the document names in `settings`.
    pub const fn new(project: &'a P, settings: &'a Settings) -> Self {
        Self { project, settings }
    }

    /// The project this locator searches.
    pub const fn project(&self) -> &'a P {
        self.project
    }

    /// All candidate documents, best ranked first.
    ///
    /// Discovery failures are logged and yield no candidates.
    pub fn find_candidates(&self) -> Vec<PathBuf> {
        let mut found = match self.project.find_named(&self.settings.candidates) {
            Ok(found) => found,
            Err(e) => {
                warn!("Failed to discover configuration documents: {e:#}");
                return Vec::new();
            }
        };

        let root = self.project.root();
        found.sort_by_key(|path| specificity(path, root));
        debug!("Found {} candidate documents", found.len());
        found
    }

    /// Read and parse one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a usable YAML
    /// mapping document.
    pub fn load(&self, path: &Path) -> Result<YamlDocument> {
        let text = self.project.read(path)?;
        Ok(YamlDocument::parse(path, &text)?)
    }

    /// Load every candidate in rank order, skipping unreadable or malformed ones.
    pub fn load_all(&self) -> Vec<YamlDocument> {
        self.find_candidates()
            .iter()
            .filter_map(|path| match self.load(path) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Skipping {}: {e:#}", path.display());
                    None
                }
            })
            .collect()
    }

    /// Find the first candidate, in rank order, that holds `key`.
    pub fn find_key(&self, key: &KeyPath) -> Option<KeyLocation> {
        find_in(&self.load_all(), key)
    }

    /// The document a fix should edit, creating it when no candidate exists.
    ///
    /// Returns the best ranked candidate if there is one. Otherwise a document
    /// holding only the marker comment is created at
    /// `{root}/{resources_dir}/{create_file}`; an existing file at that path is
    /// reused as is. Returns `None` when there is no project root or the file
    /// cannot be created.
    pub fn choose_or_create(&self) -> Option<PathBuf> {
        if let Some(best) = self.find_candidates().into_iter().next() {
            return Some(best);
        }

        match self.create_document() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("No configuration document available: {e:#}");
                None
            }
        }
    }

    fn create_document(&self) -> Result<PathBuf> {
        let root = self.project.root().ok_or(YamlBuddyError::ProjectRootUnavailable)?;
        let target = root.join(&self.settings.resources_dir).join(&self.settings.create_file);
        let content = format!("{}\n", self.settings.marker);

        if self
            .project
            .create(&target, &content)
            .with_context(|| format!("Failed to create {}", target.display()))?
        {
            info!("Created {}", target.display());
        }
        Ok(target)
    }
}

/// Probe `documents` in order for `key`.
pub(crate) fn find_in(documents: &[YamlDocument], key: &KeyPath) -> Option<KeyLocation> {
    documents.iter().find_map(|doc| {
        doc.resolve(key)
            .is_resolved()
            .then(|| doc.locate(key))
            .flatten()
            .map(|position| KeyLocation::new(doc.path(), position))
    })
}
