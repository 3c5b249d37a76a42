//! State shared by all commands.

use super::CliConfig;
use crate::config::Settings;
use crate::project::FsProject;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The project a command runs against, with its settings.
pub struct Workspace {
    /// Canonical project root
    pub root: PathBuf,
    /// Effective settings
    pub settings: Settings,
    /// Filesystem access rooted at `root`
    pub project: FsProject,
}

impl Workspace {
    /// Resolve the project root and load settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist or the settings file is
    /// invalid.
    pub async fn load(config: &CliConfig) -> Result<Self> {
        let root = match &config.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine current directory")?,
        };
        let root = tokio::fs::canonicalize(&root)
            .await
            .with_context(|| format!("Project directory not found: {}", root.display()))?;

        let settings = Settings::load_for_project(Some(&root), config.config_path.as_deref()).await?;
        let project = FsProject::new(Some(root.clone()), &settings.exclude)?;
        debug!("Project root: {}", root.display());

        Ok(Self {
            root,
            settings,
            project,
        })
    }

    /// `path` relative to the project root when it lies under it.
    #[must_use]
    pub fn display_path<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.root).unwrap_or(path).to_string_lossy()
    }
}
