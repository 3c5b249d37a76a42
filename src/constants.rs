//! Global constants used throughout the YAML Buddy codebase.
//!
//! Default values for the recognized annotation, the conventional YAML file
//! names and the location of synthesized documents live here so that the
//! configuration layer and the core agree on them.

/// Fully-qualified name of the annotation whose string literals are analyzed.
pub const DEFAULT_ANNOTATION: &str = "org.springframework.beans.factory.annotation.Value";

/// Conventional configuration document names, in discovery order.
///
/// Both names are equally valid; ranking between documents is decided by
/// their directory, not by which of these names they carry.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["application.yml", "application.yaml"];

/// File name used when a configuration document has to be created.
pub const DEFAULT_CREATE_FILE: &str = "application.yaml";

/// Canonical resources directory, relative to the project root.
pub const DEFAULT_RESOURCES_DIR: &str = "src/main/resources";

/// First line written into a freshly created configuration document.
pub const DEFAULT_MARKER: &str = "# created by YAML Buddy";

/// Project configuration file looked up at the project root.
pub const CONFIG_FILE_NAME: &str = "yamlbuddy.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "YAMLBUDDY_CONFIG";

/// Stable family identifier grouping every "create key" fix.
pub const FIX_FAMILY: &str = "YAML Buddy QuickFixes";

/// Indentation added per synthesized mapping level.
pub const INDENT_STEP: usize = 2;

/// Default glob patterns selecting source files for `check`.
pub fn default_source_patterns() -> Vec<String> {
    vec!["**/*.java".to_string()]
}

/// Default glob patterns excluded from source and document discovery.
pub fn default_exclude_patterns() -> Vec<String> {
    ["**/target/**", "**/build/**", "**/.git/**", "**/node_modules/**"]
        .iter()
        .map(|p| (*p).to_string())
        .collect()
}
