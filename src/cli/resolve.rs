//! Show where a key is declared.

use super::Workspace;
use crate::locator::{DocumentLocator, KeyLocation};
use crate::placeholder::KeyPath;
use crate::yaml::{Node, Resolution};
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Resolve a key against the ranked configuration documents.
#[derive(Args)]
pub struct ResolveCommand {
    /// Dotted key path, e.g. `server.port`
    #[arg(value_name = "KEY")]
    key: String,

    /// List every document holding the key, not just the first
    #[arg(long)]
    all: bool,
}

impl ResolveCommand {
    pub fn execute(self, workspace: &Workspace) -> Result<bool> {
        let key = KeyPath::parse(&self.key)?;
        let locator = DocumentLocator::new(&workspace.project, &workspace.settings);

        let mut found = false;
        for doc in locator.load_all() {
            let value = match doc.resolve(&key) {
                Resolution::UnresolvedAt(_) => continue,
                Resolution::Resolved(Node::Mapping(_)) => None,
                Resolution::Resolved(Node::Scalar(scalar)) => {
                    Some(scalar.value().unwrap_or_else(|| "(empty)".dimmed().to_string()))
                }
                Resolution::ResolvedValue(value) => display_value(value),
            }
            .unwrap_or_else(|| "(mapping)".dimmed().to_string());
            let Some(position) = doc.locate(&key) else {
                continue;
            };
            let location = KeyLocation::new(doc.path(), position);

            println!(
                "{}:{}:{}: {}",
                workspace.display_path(&location.file),
                location.line,
                location.column,
                value
            );
            found = true;
            if !self.all {
                break;
            }
        }

        if !found {
            eprintln!("{}: key '{key}' not found", "warning".yellow().bold());
        }
        Ok(found)
    }
}

/// Text of a value found through the value tree; `None` for a mapping.
fn display_value(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Null => Some("(empty)".dimmed().to_string()),
        serde_yaml::Value::String(text) => Some(text.clone()),
        other => Some(
            serde_yaml::to_string(other)
                .map(|text| text.trim_end().to_string())
                .unwrap_or_default(),
        ),
    }
}
