//! File system utilities
//!
//! Writes go through a temp-file-and-rename so a document is never left half
//! written, which matters because the files edited here are user-owned
//! configuration.
//!
//! # Examples
//!
//! ```rust,no_run
//! use yamlbuddy::utils::fs::{ensure_dir, safe_write};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("src/main/resources"))?;
//! safe_write(Path::new("src/main/resources/application.yaml"), "server:\n  port:\n")?;
//! # Ok(())
//! # }
//! ```

mod atomic;
mod dirs;

pub use atomic::{atomic_write, create_new, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
