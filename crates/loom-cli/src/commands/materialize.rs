//! Materialize command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use loom_core::{GeneratorConfig, MaterializerRouter};
use tracing::info;

use crate::cli::MaterializeArgs;
use crate::output::{self, OutputFormat};
use crate::utils::fs::{read_input, write_project};

/// Execute the materialize command
pub fn execute(args: &MaterializeArgs, quiet: bool) -> Result<()> {
    let raw = read_input(args.input.as_deref())?;
    let mut config = GeneratorConfig::default().with_tech_stack(args.stack.as_str());
    config.page_type.clone_from(&args.page_type);

    let result = MaterializerRouter::new()
        .materialize(&args.stack, &raw, &config)
        .with_context(|| format!("Failed to materialize for stack '{}'", args.stack))?;

    match &args.out {
        Some(out) => {
            let written = write_project(out, &result)?;
            info!(dir = %out.display(), files = written.len(), "wrote project");
            if args.format.is_machine_readable() {
                output::print_result(&result, args.format)?;
            } else if !quiet {
                println!(
                    "{} Wrote {} files to {}",
                    "✓".green(),
                    written.len(),
                    out.display().to_string().bold()
                );
            }
        },
        None if args.format == OutputFormat::Text && quiet => {},
        None => output::print_result(&result, args.format)?,
    }
    Ok(())
}
