//! Exclusive edit locks for configuration documents.
//!
//! Two fixes for the same document must not interleave their
//! read-modify-write cycles. Holding a [`DocumentLock`] serializes them across
//! threads and processes. The lock is released when the value is dropped.

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use sha2::{Digest, Sha256};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An exclusive lock on one document path.
#[derive(Debug)]
pub struct DocumentLock {
    _file: File,
    path: PathBuf,
}

impl DocumentLock {
    /// Acquire the edit lock for `document`, blocking until it is free.
    ///
    /// Lock files live outside the project so that nothing is added next to
    /// the user's sources:
    ///
    /// ```text
    /// {locks_dir}/{first 16 hex chars of sha256(document path)}.lock
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the locks directory or the lock file cannot be
    /// created, or if the OS refuses the lock.
    pub fn acquire(locks_dir: &Path, document: &Path) -> Result<Self> {
        std::fs::create_dir_all(locks_dir).with_context(|| {
            format!("Failed to create locks directory: {}", locks_dir.display())
        })?;

        let lock_path = locks_dir.join(format!("{}.lock", lock_name(document)));
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

        file.lock_exclusive()
            .with_context(|| format!("Failed to acquire edit lock for: {}", document.display()))?;
        debug!("Acquired edit lock for {}", document.display());

        Ok(Self {
            _file: file,
            path: lock_path,
        })
    }

    /// Default directory for lock files.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        std::env::temp_dir().join("yamlbuddy").join("locks")
    }

    /// Path of the lock file backing this lock.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self._file) {
            warn!("Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

fn lock_name(document: &Path) -> String {
    let canonical = document.canonicalize().unwrap_or_else(|_| document.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    hex::encode(digest)[..16].to_string()
}
