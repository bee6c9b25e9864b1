//! Stacks command implementation

use anyhow::Result;
use colored::Colorize;
use loom_core::TechStack;
use serde_json::json;

use crate::output::OutputFormat;

/// Execute the stacks command
pub fn execute(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for stack in TechStack::ALL {
                println!("{:<8} {}", stack.as_str().bold(), stack.display_name().bright_black());
            }
        },
        OutputFormat::Json => {
            let stacks: Vec<_> = TechStack::ALL
                .iter()
                .map(|stack| json!({"tag": stack.as_str(), "name": stack.display_name()}))
                .collect();
            println!("{}", serde_json::to_string_pretty(&stacks)?);
        },
    }
    Ok(())
}
