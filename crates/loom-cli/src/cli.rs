//! # CLI Structure and Argument Parsing
//!
//! The command-line interface for `loom`, built with `clap` derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # List the supported tech stacks
//! loom stacks
//!
//! # Turn generated source into a project
//! loom materialize --stack react --input hero.tsx --out ./hero
//!
//! # Compile a preview from a project directory
//! loom preview --framework vue --dir ./my-app --out preview.html
//!
//! # Generate against the configured service, streaming stage frames
//! loom generate --stack nextjs --description "a pricing page" --stream
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;

/// Main CLI structure for the `loom` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "loom")]
#[command(version)]
#[command(about = "loom - turn generated UI source into runnable projects", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides `LOOM_CONFIG` and autodiscovery)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List the supported tech-stack tags
    Stacks {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Materialize raw source into a project for one stack
    Materialize(MaterializeArgs),

    /// Compile a sandbox-ready preview document
    Preview(PreviewArgs),

    /// Generate a project with the configured generation service
    Generate(GenerateArgs),
}

/// Materialize raw source into a project for one stack
#[derive(Args, Clone, Debug)]
pub struct MaterializeArgs {
    /// Target stack (html, react, nextjs, vue, svelte)
    #[arg(short = 's', long)]
    pub stack: String,

    /// File holding the raw source (reads stdin when omitted)
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write the project files (and preview.html) under this directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Page type used for the project name and page title
    #[arg(long)]
    pub page_type: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Compile a sandbox-ready preview document
#[derive(Args, Clone, Debug)]
pub struct PreviewArgs {
    /// Framework tag the source belongs to
    #[arg(long)]
    pub framework: String,

    /// File holding raw source
    #[arg(short = 'i', long, value_name = "FILE", conflicts_with = "dir")]
    pub input: Option<PathBuf>,

    /// Project directory to pick the main file from
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Write the document here instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Title for generated documents
    #[arg(long, default_value = "Preview")]
    pub title: String,
}

/// Generate a project with the configured generation service
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Target stack (html, react, nextjs, vue, svelte)
    #[arg(short = 's', long)]
    pub stack: String,

    /// What to build
    #[arg(short = 'D', long)]
    pub description: String,

    /// Page type used for the prompt, project name and title
    #[arg(long)]
    pub page_type: Option<String>,

    /// Generation endpoint (overrides config)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Model identifier (overrides config)
    #[arg(long)]
    pub model: Option<String>,

    /// Call policy (overrides config)
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Write stage frames to stdout as server-sent events
    #[arg(long)]
    pub stream: bool,

    /// Write the project files (and preview.html) under this directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Output format when not streaming
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// `--policy` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyArg {
    /// One service call per working stage
    PerStage,
    /// One service call, remaining stages paced by the configured delay
    SingleCall,
}

impl Cli {
    /// Whether the selected command writes machine-readable output to stdout.
    pub const fn machine_output(&self) -> bool {
        match &self.command {
            Commands::Stacks { format } => format.is_machine_readable(),
            Commands::Materialize(args) => args.format.is_machine_readable(),
            Commands::Generate(args) => args.stream || args.format.is_machine_readable(),
            Commands::Preview(_) => false,
        }
    }
}
