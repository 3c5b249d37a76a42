//! Integration test suite for YAML Buddy
//!
//! End-to-end tests driving the `yamlbuddy` binary against temporary projects.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **candidates**: Candidate discovery and ranking output
//! - **check**: Finding reports, JSON output and `--fix`
//! - **config**: `yamlbuddy.toml` and `--config` handling
//! - **fix**: Single key creation, document creation and unavailable fixes
//! - **resolve**: Key lookup across ranked documents

use assert_cmd::Command;
use yamlbuddy::test_utils::TestProject;

mod candidates;
mod check;
mod config;
mod fix;
mod resolve;

/// A `yamlbuddy` command rooted at `project`, with a clean environment.
pub fn yamlbuddy(project: &TestProject) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_yamlbuddy"));
    cmd.arg("--project")
        .arg(project.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("YAMLBUDDY_CONFIG");
    cmd
}

/// A Spring component reading the given keys through `@Value`.
pub fn component(keys: &[&str]) -> String {
    let mut source = String::from(
        "package demo;\n\nimport org.springframework.beans.factory.annotation.Value;\n\npublic class Settings {\n",
    );
    for (i, key) in keys.iter().enumerate() {
        source.push_str(&format!("    @Value(\"${{{key}}}\")\n    private String field{i};\n\n"));
    }
    source.push_str("}\n");
    source
}

pub const MAIN_YAML: &str = "src/main/resources/application.yml";
pub const CREATED_YAML: &str = "src/main/resources/application.yaml";
pub const SOURCE: &str = "src/main/java/demo/Settings.java";
