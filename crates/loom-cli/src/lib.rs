//! loom CLI - turn generated UI source into runnable projects
//!
//! All command implementations live in separate modules; this file wires parsing,
//! logging and configuration to them.

use anyhow::{Context, Result};
use clap::Parser;
use loom_core::Config;

mod cli;
mod commands;
mod output;
mod utils;

use crate::utils::initialize_logging;
use cli::{Cli, Commands};

/// Execute the loom CLI with the current process arguments.
///
/// # Errors
///
/// Returns an error if logging or configuration cannot be initialized, or the command
/// fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    match &cli.command {
        Commands::Stacks { format } => commands::list_stacks(*format),
        Commands::Materialize(args) => commands::materialize(args, quiet),
        Commands::Preview(args) => commands::preview(args),
        Commands::Generate(args) => {
            let config = load_config(&cli)?;
            commands::generate(args, config, quiet).await
        },
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Config::load().context("Failed to load config"),
    }
}
