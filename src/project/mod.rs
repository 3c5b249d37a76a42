//! Project file access.
//!
//! The locator, diagnostics and fix code never touch the filesystem directly;
//! they go through the [`ProjectFiles`] trait. [`FsProject`] implements it on
//! a real directory tree, and the `test-utils` feature adds an in-memory
//! implementation for tests.
//!
//! Discovery walks the tree in file-name order without following symlinks,
//! skipping anything matched by the configured exclude globs.

pub mod lock;

pub use lock::DocumentLock;

use crate::utils::fs::{create_new, safe_write};
use anyhow::{Context, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// File operations the analysis and fix code need from a project.
pub trait ProjectFiles {
    /// The project root, if one is known.
    fn root(&self) -> Option<&Path>;

    /// Every file under the root whose file name is one of `names`.
    ///
    /// Order is deterministic. Without a root the result is empty.
    fn find_named(&self, names: &[String]) -> Result<Vec<PathBuf>>;

    /// Read the whole file as UTF-8.
    fn read(&self, path: &Path) -> Result<String>;

    /// Replace the content of `path`, creating it if needed.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Create `path` with `content` unless it exists. Returns whether it was created.
    fn create(&self, path: &Path, content: &str) -> Result<bool>;

    /// Take an exclusive edit lock on `path`, if the backend supports locking.
    fn lock_for_edit(&self, _path: &Path) -> Result<Option<DocumentLock>> {
        Ok(None)
    }
}

/// A project rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct FsProject {
    root: Option<PathBuf>,
    exclude: Vec<Pattern>,
    locks_dir: PathBuf,
}

impl FsProject {
    /// Create a project for `root` with glob `exclude` patterns.
    ///
    /// Patterns are matched against paths relative to the root.
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn new(root: Option<PathBuf>, exclude: &[String]) -> Result<Self> {
        let exclude = exclude
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            root,
            exclude,
            locks_dir: DocumentLock::default_dir(),
        })
    }

    /// Use `dir` for edit lock files instead of the system temp directory.
    #[must_use]
    pub fn with_locks_dir(mut self, dir: PathBuf) -> Self {
        self.locks_dir = dir;
        self
    }

    /// Every file under the root matching one of the glob `patterns`.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid or the tree cannot be walked.
    pub fn find_matching(&self, patterns: &[String]) -> Result<Vec<PathBuf>> {
        let patterns = patterns
            .iter()
            .map(|p| Pattern::new(p).with_context(|| format!("Invalid source pattern: {p}")))
            .collect::<Result<Vec<_>>>()?;

        self.walk(|relative| patterns.iter().any(|p| p.matches_path(relative)))
    }

    fn walk(&self, mut keep: impl FnMut(&Path) -> bool) -> Result<Vec<PathBuf>> {
        let Some(root) = &self.root else {
            return Ok(Vec::new());
        };

        let mut found = Vec::new();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(root, entry.path(), entry.file_type().is_dir()));

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if keep(relative) {
                trace!("Discovered {}", relative.display());
                found.push(entry.into_path());
            }
        }

        debug!("Discovered {} files under {}", found.len(), root.display());
        Ok(found)
    }

    fn is_excluded(&self, root: &Path, path: &Path, is_dir: bool) -> bool {
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        // A directory is pruned when everything below it would be excluded.
        let probe = if is_dir { relative.join("x") } else { relative.to_path_buf() };
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(&probe))
    }
}

impl ProjectFiles for FsProject {
    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn find_named(&self, names: &[String]) -> Result<Vec<PathBuf>> {
        self.walk(|relative| {
            relative
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| names.iter().any(|n| n == name))
        })
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        safe_write(path, content)
    }

    fn create(&self, path: &Path, content: &str) -> Result<bool> {
        create_new(path, content)
    }

    fn lock_for_edit(&self, path: &Path) -> Result<Option<DocumentLock>> {
        DocumentLock::acquire(&self.locks_dir, path).map(Some)
    }
}
