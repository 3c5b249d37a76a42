//! Filesystem helpers shared by the project layer.
//!
//! - [`fs`] - Directory creation and atomic file writes

pub mod fs;

pub use fs::{atomic_write, ensure_dir, ensure_parent_dir, safe_write};
