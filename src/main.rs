//! YAML Buddy CLI entry point
//!
//! Parses arguments, runs the command and turns errors into readable messages.
//! Exit status is 0 on success, 1 when unresolved keys remain, a fix is
//! unavailable, a key is not found, or the command failed.

use anyhow::Result;
use clap::Parser;
use yamlbuddy::cli;
use yamlbuddy::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
