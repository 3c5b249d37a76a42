use crate::project::ProjectFiles;
use anyhow::{Result, anyhow};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// An in-memory project. Paths are used as given; no normalization.
#[derive(Debug, Default)]
pub struct MemoryProject {
    root: Option<PathBuf>,
    files: RefCell<BTreeMap<PathBuf, String>>,
    read_only: bool,
    reads: Cell<usize>,
    writes: Cell<usize>,
}

impl MemoryProject {
    /// An empty project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// A project whose root cannot be determined.
    #[must_use]
    pub fn without_root() -> Self {
        Self::default()
    }

    /// Add a file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.borrow_mut().insert(path.into(), content.to_string());
        self
    }

    /// Make every write and create fail.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Current content of `path`.
    #[must_use]
    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.borrow().len()
    }

    /// Number of successful reads so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    /// Number of successful writes and creates so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.read_only {
            return Err(anyhow!("Read-only project: cannot write {}", path.display()));
        }
        Ok(())
    }
}

impl ProjectFiles for MemoryProject {
    fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    fn find_named(&self, names: &[String]) -> Result<Vec<PathBuf>> {
        let Some(root) = &self.root else {
            return Ok(Vec::new());
        };
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|path| path.starts_with(root))
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| names.iter().any(|n| n == name))
            })
            .cloned()
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String> {
        let content = self
            .content(path)
            .ok_or_else(|| anyhow!("No such file: {}", path.display()))?;
        self.reads.set(self.reads.get() + 1);
        Ok(content)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.check_writable(path)?;
        self.files.borrow_mut().insert(path.to_path_buf(), content.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn create(&self, path: &Path, content: &str) -> Result<bool> {
        if self.files.borrow().contains_key(path) {
            return Ok(false);
        }
        self.write(path, content)?;
        Ok(true)
    }
}
