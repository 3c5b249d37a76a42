//! Create one key.

use super::Workspace;
use crate::fix::{CreateKeyFix, FixExecutor};
use crate::placeholder::KeyPath;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Create a key path in the configuration document.
#[derive(Args)]
pub struct FixCommand {
    /// Dotted key path, e.g. `server.port`
    #[arg(value_name = "KEY")]
    key: String,
}

impl FixCommand {
    pub fn execute(self, workspace: &Workspace) -> Result<bool> {
        let key = KeyPath::parse(&self.key)?;
        let executor = FixExecutor::new(&workspace.project, &workspace.settings);
        let fix = CreateKeyFix::new(key);

        match fix.invoke(&executor) {
            Some(location) => {
                println!(
                    "{}:{}:{}",
                    workspace.display_path(&location.file),
                    location.line,
                    location.column
                );
                Ok(true)
            }
            None => {
                eprintln!(
                    "{}: could not create key '{}': no editable configuration document",
                    "warning".yellow().bold(),
                    fix.key_path()
                );
                Ok(false)
            }
        }
    }
}
