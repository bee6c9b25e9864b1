//! Generate command implementation

use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;
use loom_core::orchestrator::HttpGenerationService;
use loom_core::orchestrator::stream::FrameSink;
use loom_core::{
    Config, GenerationOrchestrator, GenerationPipeline, GenerationPolicy, GeneratorConfig,
    PipelineStage,
};
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::{GenerateArgs, PolicyArg};
use crate::output::{self, StageProgress};
use crate::utils::fs::write_project;

/// Execute the generate command
pub async fn execute(args: &GenerateArgs, mut config: Config, quiet: bool) -> Result<()> {
    if let Some(endpoint) = &args.endpoint {
        config.service.endpoint.clone_from(endpoint);
    }
    if let Some(model) = &args.model {
        config.service.model.clone_from(model);
    }
    let policy = match args.policy {
        Some(PolicyArg::PerStage) => GenerationPolicy::PerStage,
        Some(PolicyArg::SingleCall) => GenerationPolicy::SingleCall {
            stage_delay: std::time::Duration::from_millis(config.generation.stage_delay_ms),
        },
        None => config.generation.policy(),
    };

    let service = HttpGenerationService::from_config(&config.service)?;
    let pipeline = GenerationPipeline::new(GenerationOrchestrator::new(service).with_policy(policy));

    let mut generator_config = GeneratorConfig::default();
    generator_config.page_type.clone_from(&args.page_type);

    let outcome = if args.stream {
        run_streaming(&pipeline, args, &generator_config).await
    } else {
        run_with_progress(&pipeline, args, &generator_config, quiet).await
    };
    let result = outcome.with_context(|| format!("Generation for stack '{}' failed", args.stack))?;

    if let Some(out) = &args.out {
        let written = write_project(out, &result)?;
        info!(dir = %out.display(), files = written.len(), "wrote project");
        if !args.stream && !quiet && !args.format.is_machine_readable() {
            println!(
                "{} Wrote {} files to {}",
                "✓".green(),
                written.len(),
                out.display().to_string().bold()
            );
        }
    } else if !args.stream {
        output::print_result(&result, args.format)?;
    }
    Ok(())
}

/// Run with frames written to stdout as they are produced, then the sentinel.
async fn run_streaming(
    pipeline: &GenerationPipeline<HttpGenerationService>,
    args: &GenerateArgs,
    config: &GeneratorConfig,
) -> loom_core::Result<loom_core::GenerationResult> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let sink = FrameSink::new(tx);

    let printer = tokio::spawn(async move {
        let mut stdout = std::io::stdout();
        while let Some(frame) = rx.recv().await {
            if stdout.write_all(frame.as_bytes()).and_then(|()| stdout.flush()).is_err() {
                // Reader went away; stop printing but let generation finish.
                break;
            }
        }
    });

    let emitter = sink.clone();
    let outcome = pipeline
        .run(&args.stack, &args.description, config, move |event: &PipelineStage| {
            emitter.emit(event);
        })
        .await;

    // Invalid tags never produce stage frames, so they get no sentinel either.
    if !matches!(
        outcome,
        Err(loom_core::Error::MissingTechStack | loom_core::Error::UnknownTechStack(_))
    ) {
        sink.finish();
    }
    drop(sink);
    if let Err(e) = printer.await {
        tracing::debug!("frame printer stopped: {e}");
    }
    outcome
}

async fn run_with_progress(
    pipeline: &GenerationPipeline<HttpGenerationService>,
    args: &GenerateArgs,
    config: &GeneratorConfig,
    quiet: bool,
) -> loom_core::Result<loom_core::GenerationResult> {
    let progress = StageProgress::new(quiet || args.format.is_machine_readable());
    let outcome = pipeline
        .run(&args.stack, &args.description, config, |event| progress.update(event))
        .await;
    match &outcome {
        Ok(_) => progress.finish("complete"),
        Err(e) => progress.abandon(&e.to_string()),
    }
    outcome
}
