//! Command-line interface for YAML Buddy.
//!
//! # Commands
//!
//! - `check` - Report unresolved `${...}` keys in annotated source literals
//! - `fix` - Create one key in the configuration document
//! - `resolve` - Show where a key is declared
//! - `candidates` - List configuration documents in rank order
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging on stderr
//! - `--quiet` / `-q` - No logging at all
//! - `--config` / `-c` - Settings file (also `YAMLBUDDY_CONFIG`)
//! - `--project` / `-p` - Project root (defaults to the current directory)
//!
//! Without `--verbose` or `--quiet`, `RUST_LOG` selects the log filter and
//! warnings are shown by default.

mod candidates;
mod check;
mod common;
mod fix;
mod resolve;

pub use check::OutputFormat;
pub use common::Workspace;

use crate::constants::CONFIG_ENV_VAR;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Settings derived from global flags, shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter; `None` disables logging
    pub log_level: Option<String>,
    /// Explicit settings file
    pub config_path: Option<PathBuf>,
    /// Explicit project root
    pub project_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Install the global `tracing` subscriber writing to stderr.
    ///
    /// Safe to call more than once; only the first call installs anything.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = if level.is_empty() {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        } else {
            EnvFilter::new(level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// YAML Buddy command line.
#[derive(Parser)]
#[command(
    name = "yamlbuddy",
    about = "Find unresolved ${...} configuration keys and create them in application.yaml",
    version,
    author,
    long_about = "YAML Buddy scans string literals of @Value annotations for ${...} placeholders, \
                  reports keys missing from application.yml/application.yaml, and creates them \
                  without disturbing the rest of the document."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a yamlbuddy.toml settings file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Project root directory (defaults to the current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report unresolved keys in annotated literals
    Check(check::CheckCommand),

    /// Create a key in the configuration document
    Fix(fix::FixCommand),

    /// Show where a key is declared
    Resolve(resolve::ResolveCommand),

    /// List configuration documents in rank order
    Candidates(candidates::CandidatesCommand),
}

impl Cli {
    /// Run the selected command.
    ///
    /// Returns `Ok(false)` when the command completed but found problems
    /// (unresolved keys, an unavailable fix, a key not found); the binary maps
    /// that to exit status 1.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid input or failures reading the project.
    pub async fn execute(self) -> Result<bool> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Derive the shared configuration from global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            // Empty: defer to RUST_LOG
            Some(String::new())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            project_dir: self.project.clone(),
        }
    }

    /// Run the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn execute_with_config(self, config: CliConfig) -> Result<bool> {
        let workspace = Workspace::load(&config).await?;
        match self.command {
            Commands::Check(cmd) => cmd.execute(&workspace).await,
            Commands::Fix(cmd) => cmd.execute(&workspace),
            Commands::Resolve(cmd) => cmd.execute(&workspace),
            Commands::Candidates(cmd) => cmd.execute(&workspace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_levels() {
        let cli = Cli::parse_from(["yamlbuddy", "--verbose", "candidates"]);
        assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));

        let cli = Cli::parse_from(["yamlbuddy", "candidates", "--quiet"]);
        assert_eq!(cli.build_config().log_level, None);

        let cli = Cli::parse_from(["yamlbuddy", "-p", "/tmp/app", "candidates"]);
        let config = cli.build_config();
        assert_eq!(config.log_level.as_deref(), Some(""));
        assert_eq!(config.project_dir, Some(PathBuf::from("/tmp/app")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["yamlbuddy", "-v", "-q", "candidates"]).is_err());
    }

    #[test]
    fn test_command_parsing() {
        assert!(Cli::try_parse_from(["yamlbuddy", "check", "--format", "json", "--fix", "A.java"]).is_ok());
        assert!(Cli::try_parse_from(["yamlbuddy", "fix", "server.port"]).is_ok());
        assert!(Cli::try_parse_from(["yamlbuddy", "resolve", "server.port", "--all"]).is_ok());
        assert!(Cli::try_parse_from(["yamlbuddy", "fix"]).is_err());
        assert!(Cli::try_parse_from(["yamlbuddy", "check", "--format", "xml"]).is_err());
    }
}
