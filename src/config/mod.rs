//! Configuration for YAML Buddy
//!
//! Settings come from an optional `yamlbuddy.toml` at the project root, or
//! from the file named by `--config` / `YAMLBUDDY_CONFIG`. Every field has a
//! default, so an empty file and a missing file behave the same.
//!
//! ```toml
//! # Fully-qualified annotation whose string literals are analyzed
//! annotation = "org.springframework.beans.factory.annotation.Value"
//!
//! # Document names searched for, and the one created when none exists
//! candidates = ["application.yml", "application.yaml"]
//! create_file = "application.yaml"
//! resources_dir = "src/main/resources"
//! marker = "# created by YAML Buddy"
//!
//! # Source files scanned by `check`, and paths skipped everywhere
//! sources = ["**/*.java"]
//! exclude = ["**/target/**", "**/build/**"]
//! ```

mod settings;

pub use settings::Settings;
