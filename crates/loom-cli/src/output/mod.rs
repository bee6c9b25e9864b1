//! # Output Formatting
//!
//! Commands print either human-readable text (colored unless disabled) or a single
//! JSON document for scripts:
//!
//! ```bash
//! loom stacks --format json | jq '.[].tag'
//! loom materialize --stack vue --input app.vue --format json | jq '.files[].path'
//! ```
//!
//! Progress for `generate` goes to stderr so stdout stays clean for piping.

mod progress;

pub use progress::StageProgress;

use clap::ValueEnum;
use colored::Colorize;
use loom_core::GenerationResult;
use serde::{Deserialize, Serialize};

/// Output format for CLI results.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable formatted text
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

impl OutputFormat {
    /// Whether stdout carries structured output that logs must not interleave with.
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Print a materialized project in `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_result(result: &GenerationResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            println!(
                "{} {} project, {} files",
                "✓".green(),
                result.framework.display_name().bold(),
                result.files.len()
            );
            for file in &result.files {
                let marker = if file.path == result.preview_entry { "*" } else { " " };
                println!(
                    " {marker} {:<28} {:>6} bytes  {}",
                    file.path,
                    file.content.len(),
                    file.language.to_string().dimmed()
                );
            }
            if result.preview_html.is_some() {
                println!("   {}", "preview available".dimmed());
            }
        },
    }
    Ok(())
}
