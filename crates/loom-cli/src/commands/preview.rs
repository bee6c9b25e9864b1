//! Preview command implementation

use anyhow::{Context, Result, bail};
use loom_core::{PreviewCompiler, TechStack, preview_identity};
use tracing::info;

use crate::cli::PreviewArgs;
use crate::utils::fs::{load_project, read_input, write_file};

/// Execute the preview command
pub fn execute(args: &PreviewArgs) -> Result<()> {
    let framework: TechStack = args
        .framework
        .parse()
        .with_context(|| format!("Invalid framework '{}'", args.framework))?;
    let compiler = PreviewCompiler::new().with_title(args.title.as_str());

    let document = match (&args.input, &args.dir) {
        (Some(input), None) => compiler.compile_source(&read_input(Some(input))?, framework),
        (None, Some(dir)) => compiler.compile(&load_project(dir)?, framework),
        _ => bail!("pass exactly one of --input or --dir"),
    };

    match &args.out {
        Some(out) => {
            write_file(out, &document)?;
            info!(path = %out.display(), identity = %preview_identity(&document), "wrote preview");
        },
        None => print!("{document}"),
    }
    Ok(())
}
