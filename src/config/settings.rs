use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_ANNOTATION, DEFAULT_CANDIDATES, DEFAULT_CREATE_FILE, DEFAULT_MARKER,
    DEFAULT_RESOURCES_DIR, default_exclude_patterns, default_source_patterns,
};
use crate::core::YamlBuddyError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

fn default_annotation() -> String {
    DEFAULT_ANNOTATION.to_string()
}

fn default_candidates() -> Vec<String> {
    DEFAULT_CANDIDATES.iter().map(|name| (*name).to_string()).collect()
}

fn default_create_file() -> String {
    DEFAULT_CREATE_FILE.to_string()
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from(DEFAULT_RESOURCES_DIR)
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

/// Project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Fully-qualified name of the annotation whose literals are analyzed.
    #[serde(default = "default_annotation")]
    pub annotation: String,

    /// Configuration document file names, in discovery order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    /// File name of a document created when none exists.
    #[serde(default = "default_create_file")]
    pub create_file: String,

    /// Directory, relative to the project root, holding a created document.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    /// First line of a created document.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Glob patterns selecting source files for `check`.
    #[serde(default = "default_source_patterns")]
    pub sources: Vec<String>,

    /// Glob patterns excluded from all discovery.
    #[serde(default = "default_exclude_patterns")]
    pub exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            annotation: default_annotation(),
            candidates: default_candidates(),
            create_file: default_create_file(),
            resources_dir: default_resources_dir(),
            marker: default_marker(),
            sources: default_source_patterns(),
            exclude: default_exclude_patterns(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`YamlBuddyError::ConfigParseError`] for invalid TOML, unknown
    /// fields, or values that fail [`validate`](Self::validate).
    pub fn parse(content: &str, file: &Path) -> Result<Self, YamlBuddyError> {
        let settings: Self = toml::from_str(content).map_err(|e| YamlBuddyError::ConfigParseError {
            file: file.display().to_string(),
            reason: e.to_string(),
        })?;
        settings.validate().map_err(|reason| YamlBuddyError::ConfigParseError {
            file: file.display().to_string(),
            reason,
        })?;
        Ok(settings)
    }

    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let settings = Self::parse(&content, path)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(settings)
    }

    /// Load the settings that apply to a project.
    ///
    /// An `explicit` file must exist. Otherwise `yamlbuddy.toml` at the
    /// project root is used when present, and defaults when not.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub async fn load_for_project(root: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path).await;
        }

        if let Some(root) = root {
            let path = root.join(CONFIG_FILE_NAME);
            if fs::try_exists(&path).await.unwrap_or(false) {
                return Self::load_from(&path).await;
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Check values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.annotation.trim().is_empty() {
            return Err("'annotation' must not be empty".to_string());
        }
        if self.candidates.is_empty() {
            return Err("'candidates' must name at least one file".to_string());
        }
        if let Some(name) = self
            .candidates
            .iter()
            .chain(std::iter::once(&self.create_file))
            .find(|name| name.is_empty() || name.contains(['/', '\\']))
        {
            return Err(format!("'{name}' is not a plain file name"));
        }
        if self.resources_dir.is_absolute() {
            return Err("'resources_dir' must be relative to the project root".to_string());
        }
        if self.marker.contains('\n') || !self.marker.trim_start().starts_with('#') {
            return Err("'marker' must be a single YAML comment line".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::parse("", Path::new("yamlbuddy.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.candidates, ["application.yml", "application.yaml"]);
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::parse(
            "annotation = \"com.acme.Prop\"\ncreate_file = \"application.yml\"\n",
            Path::new("yamlbuddy.toml"),
        )
        .unwrap();
        assert_eq!(settings.annotation, "com.acme.Prop");
        assert_eq!(settings.create_file, "application.yml");
        assert_eq!(settings.marker, DEFAULT_MARKER);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for content in [
            "candidates = []",
            "create_file = \"conf/application.yaml\"",
            "marker = \"not a comment\"",
            "unknown_field = 1",
            "annotation = ",
        ] {
            let err = Settings::parse(content, Path::new("yamlbuddy.toml")).unwrap_err();
            assert!(matches!(err, YamlBuddyError::ConfigParseError { .. }), "accepted {content}");
        }
    }

    #[tokio::test]
    async fn test_load_for_project_prefers_explicit_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "create_file = \"a.yml\"\n").unwrap();
        let explicit = temp.path().join("other.toml");
        std::fs::write(&explicit, "create_file = \"b.yml\"\n").unwrap();

        let from_root = Settings::load_for_project(Some(temp.path()), None).await.unwrap();
        assert_eq!(from_root.create_file, "a.yml");

        let from_explicit =
            Settings::load_for_project(Some(temp.path()), Some(&explicit)).await.unwrap();
        assert_eq!(from_explicit.create_file, "b.yml");
    }

    #[tokio::test]
    async fn test_missing_files() {
        let temp = TempDir::new().unwrap();
        let defaults = Settings::load_for_project(Some(temp.path()), None).await.unwrap();
        assert_eq!(defaults, Settings::default());

        let missing = temp.path().join("missing.toml");
        assert!(Settings::load_for_project(None, Some(&missing)).await.is_err());
    }
}
