//! Test utilities for YAML Buddy
//!
//! Helpers shared by unit and integration tests:
//! - [`init_test_logging`] routes `tracing` output to the test writer
//! - [`MemoryProject`] is an in-memory [`ProjectFiles`](crate::project::ProjectFiles)
//! - [`TestProject`] is a temporary project directory on disk
//!
//! # Example
//!
//! ```rust,no_run
//! use yamlbuddy::test_utils::TestProject;
//!
//! # fn example() -> anyhow::Result<()> {
//! let project = TestProject::new()?;
//! project.write("src/main/resources/application.yml", "server:\n  port: 8080\n")?;
//! assert!(project.exists("src/main/resources/application.yml"));
//! # Ok(())
//! # }
//! ```

mod memory;
mod project;

pub use memory::MemoryProject;
pub use project::TestProject;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// With a `level`, that level is used. Otherwise `RUST_LOG` is honored when
/// set, and logging stays off when it is not.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
