//! End-to-end generation: validate the stack, run the stages, materialize the result.

use crate::materialize::MaterializerRouter;
use crate::orchestrator::{GenerationOrchestrator, GenerationService, PipelineStage};
use crate::types::{GenerationResult, GeneratorConfig, TechStack};
use crate::Result;

/// Owns an orchestrator and routes its final source to a materializer.
pub struct GenerationPipeline<S: GenerationService> {
    orchestrator: GenerationOrchestrator<S>,
    router: MaterializerRouter,
}

impl<S: GenerationService> GenerationPipeline<S> {
    /// Wrap `orchestrator` with the built-in materializers.
    #[must_use]
    pub const fn new(orchestrator: GenerationOrchestrator<S>) -> Self {
        Self {
            orchestrator,
            router: MaterializerRouter::new(),
        }
    }

    /// The wrapped orchestrator.
    #[must_use]
    pub const fn orchestrator(&self) -> &GenerationOrchestrator<S> {
        &self.orchestrator
    }

    /// Generate a project for `tech_stack` from `description`.
    ///
    /// The tag is checked before anything else, so an invalid tag produces no stage
    /// events at all.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingTechStack`](crate::Error::MissingTechStack) or
    ///   [`Error::UnknownTechStack`](crate::Error::UnknownTechStack) for a bad tag
    /// - [`Error::Generation`](crate::Error::Generation) when the service fails; the
    ///   terminal `complete` event with `error` set has already been delivered
    pub async fn run<F>(
        &self,
        tech_stack: &str,
        description: &str,
        config: &GeneratorConfig,
        on_stage: F,
    ) -> Result<GenerationResult>
    where
        F: FnMut(&PipelineStage) + Send,
    {
        let stack: TechStack = tech_stack.parse()?;
        let config = config.clone().with_tech_stack(stack.as_str());

        let source = self.orchestrator.run(description, &config, on_stage).await?;
        Ok(self.router.materialize_stack(stack, &source, &config))
    }
}
