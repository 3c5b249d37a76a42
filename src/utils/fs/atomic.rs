//! Atomic file write operations using temp-and-rename strategy.

use super::dirs::ensure_parent_dir;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Safely writes a string to a file using atomic operations.
///
/// # Errors
///
/// See [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file.
///
/// The content goes to a temporary file in the target's directory, is synced
/// to disk, and then renamed over the target. Readers see either the old or
/// the new content. Missing parent directories are created, and a replaced
/// file keeps its permissions.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or if any step
/// of the write fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in: {}", dir.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    if let Ok(metadata) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(metadata.permissions())
            .with_context(|| format!("Failed to copy permissions to: {}", path.display()))?;
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Creates `path` with `content` unless it already exists.
///
/// Returns `Ok(false)` without touching the file if it exists.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be created.
pub fn create_new(path: &Path, content: &str) -> Result<bool> {
    ensure_parent_dir(path)?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create file: {}", path.display()));
        }
    };
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.sync_all().with_context(|| "Failed to sync file to disk")?;
    Ok(true)
}
