//! List configuration documents.

use super::Workspace;
use crate::locator::{DocumentLocator, specificity};
use crate::project::ProjectFiles;
use anyhow::Result;
use clap::Args;

/// Print candidate documents, best ranked first, with their rank.
#[derive(Args)]
pub struct CandidatesCommand {}

impl CandidatesCommand {
    pub fn execute(self, workspace: &Workspace) -> Result<bool> {
        let locator = DocumentLocator::new(&workspace.project, &workspace.settings);
        let candidates = locator.find_candidates();

        if candidates.is_empty() {
            println!("No configuration documents found");
            return Ok(true);
        }

        let root = workspace.project.root();
        for path in &candidates {
            println!("{}\t{}", specificity(path, root), workspace.display_path(path));
        }
        Ok(true)
    }
}
