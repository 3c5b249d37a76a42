use crate::project::FsProject;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory, removed on drop.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    /// Create an empty project directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp project")?;
        Ok(Self { temp })
    }

    /// The project root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Absolute path of `relative`.
    #[must_use]
    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    /// Write a file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Read a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, relative: &str) -> Result<String> {
        let path = self.join(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Whether `relative` exists.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }

    /// An [`FsProject`] over this directory with default excludes and lock
    /// files kept inside the temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the default exclude patterns fail to compile.
    pub fn fs_project(&self) -> Result<FsProject> {
        let project = FsProject::new(
            Some(self.path().to_path_buf()),
            &crate::constants::default_exclude_patterns(),
        )?;
        Ok(project.with_locks_dir(self.join(".locks")))
    }
}
