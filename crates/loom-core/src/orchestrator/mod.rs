//! Staged generation against an external service.
//!
//! A run walks a fixed, strictly ordered list of stages:
//!
//! ```text
//! preparing -> structure -> styling -> interactions -> polishing -> complete
//! ```
//!
//! The caller's callback sees every stage as it is entered, synchronously and in order.
//! `complete` is the only terminal stage; when the service fails it carries the
//! classified error message and nothing is emitted after it. The orchestrator never
//! retries: deadlines and retries belong to the [`GenerationService`] implementation.

mod http;
pub mod prompt;
mod service;
pub mod stream;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::instrument;

pub use http::HttpGenerationService;
pub use service::{GenerationRequest, GenerationService, ServiceError, ServiceErrorKind};

use crate::analysis;
use crate::types::GeneratorConfig;

/// Default pause between simulated stages of the single-call policy.
pub const DEFAULT_STAGE_DELAY: Duration = Duration::from_millis(400);

/// A step of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Request accepted, nothing generated yet.
    Preparing,
    /// Page structure and content.
    Structure,
    /// Visual styling.
    Styling,
    /// State and event handling.
    Interactions,
    /// Accessibility and final details.
    Polishing,
    /// Terminal stage, reached on success and on failure.
    Complete,
}

impl Stage {
    /// Every stage in run order.
    pub const ORDER: [Self; 6] = [
        Self::Preparing,
        Self::Structure,
        Self::Styling,
        Self::Interactions,
        Self::Polishing,
        Self::Complete,
    ];

    /// Stages that do generation work.
    pub const WORKING: [Self; 4] = [
        Self::Structure,
        Self::Styling,
        Self::Interactions,
        Self::Polishing,
    ];

    /// Progress percentage reported when the stage is entered.
    #[must_use]
    pub const fn progress(self) -> u8 {
        match self {
            Self::Preparing => 0,
            Self::Structure => 20,
            Self::Styling => 40,
            Self::Interactions => 60,
            Self::Polishing => 80,
            Self::Complete => 100,
        }
    }

    /// The stage after this one, `None` for `complete`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Preparing => Some(Self::Structure),
            Self::Structure => Some(Self::Styling),
            Self::Styling => Some(Self::Interactions),
            Self::Interactions => Some(Self::Polishing),
            Self::Polishing => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Whether this is the last stage of a run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Wire tag of this stage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::Structure => "structure",
            Self::Styling => "styling",
            Self::Interactions => "interactions",
            Self::Polishing => "polishing",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress event delivered to the stage callback and streamed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    /// Stage being entered.
    pub stage: Stage,
    /// Percentage complete, 0 to 100.
    pub progress: u8,
    /// User-facing failure message; only set on a terminal `complete`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineStage {
    /// Event for entering `stage`.
    #[must_use]
    pub const fn new(stage: Stage) -> Self {
        Self {
            stage,
            progress: stage.progress(),
            error: None,
        }
    }

    /// Terminal event for a failed run.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stage: Stage::Complete,
            progress: Stage::Complete.progress(),
            error: Some(message.into()),
        }
    }

    /// Whether this event ends the run.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }
}

/// How many service calls a run makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationPolicy {
    /// One call per working stage, each refining the previous stage's source.
    PerStage,
    /// One call during `structure`; later working stages are paced by `stage_delay`.
    SingleCall { stage_delay: Duration },
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self::SingleCall {
            stage_delay: DEFAULT_STAGE_DELAY,
        }
    }
}

impl GenerationPolicy {
    /// Stable tag used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PerStage => "per_stage",
            Self::SingleCall { .. } => "single_call",
        }
    }
}

/// Sequences generation stages and service calls.
///
/// ## Example
///
/// ```rust
/// use loom_core::GeneratorConfig;
/// use loom_core::orchestrator::{
///     GenerationOrchestrator, GenerationPolicy, GenerationRequest, GenerationService,
///     ServiceError,
/// };
/// use std::time::Duration;
///
/// struct Canned;
///
/// #[async_trait::async_trait]
/// impl GenerationService for Canned {
///     async fn generate(&self, _: &GenerationRequest) -> Result<String, ServiceError> {
///         Ok("```html\n<div>Hi</div>\n```".to_string())
///     }
/// }
///
/// # tokio_test(async {
/// let orchestrator = GenerationOrchestrator::new(Canned)
///     .with_policy(GenerationPolicy::SingleCall { stage_delay: Duration::ZERO });
/// let mut seen = Vec::new();
/// let source = orchestrator
///     .run("a greeting", &GeneratorConfig::default(), |stage| seen.push(stage.stage))
///     .await?;
/// assert_eq!(source, "<div>Hi</div>");
/// assert_eq!(seen.len(), 6);
/// # Ok::<(), ServiceError>(())
/// # });
/// # fn tokio_test<F: std::future::Future<Output = Result<(), ServiceError>>>(f: F) {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f).unwrap();
/// # }
/// ```
pub struct GenerationOrchestrator<S: GenerationService> {
    service: S,
    policy: GenerationPolicy,
}

impl<S: GenerationService> GenerationOrchestrator<S> {
    /// Create with the default single-call policy.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            service,
            policy: GenerationPolicy::default(),
        }
    }

    /// Set the call policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured call policy.
    #[must_use]
    pub const fn policy(&self) -> GenerationPolicy {
        self.policy
    }

    /// The underlying generation service.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Run every stage, returning the final source with markdown fences removed.
    ///
    /// `on_stage` is called once per stage, in order, before the run advances.
    ///
    /// # Errors
    ///
    /// The first [`ServiceError`]. By then `on_stage` has received a terminal
    /// `complete` event carrying [`ServiceError::user_message`], and is not called
    /// again.
    #[instrument(skip_all, fields(policy = self.policy.as_str()))]
    pub async fn run<F>(
        &self,
        description: &str,
        config: &GeneratorConfig,
        on_stage: F,
    ) -> Result<String, ServiceError>
    where
        F: FnMut(&PipelineStage) + Send,
    {
        let mut emitter = Emitter::new(on_stage);
        emitter.enter(Stage::Preparing);

        let outcome = match self.policy {
            GenerationPolicy::PerStage => self.run_per_stage(description, config, &mut emitter).await,
            GenerationPolicy::SingleCall { stage_delay } => {
                self.run_single_call(description, config, stage_delay, &mut emitter)
                    .await
            },
        };

        match outcome {
            Ok(source) => {
                emitter.enter(Stage::Complete);
                tracing::debug!(bytes = source.len(), "generation complete");
                Ok(source)
            },
            Err(err) => {
                tracing::warn!(kind = %err.kind, error = %err.message, "generation failed");
                emitter.fail(&err);
                Err(err)
            },
        }
    }

    async fn run_per_stage<F>(
        &self,
        description: &str,
        config: &GeneratorConfig,
        emitter: &mut Emitter<F>,
    ) -> Result<String, ServiceError>
    where
        F: FnMut(&PipelineStage) + Send,
    {
        let mut previous: Option<String> = None;
        for stage in Stage::WORKING {
            emitter.enter(stage);
            let request = GenerationRequest::new(stage, description, config.clone())
                .with_previous(previous.take());
            previous = Some(self.call(&request).await?);
        }
        previous.ok_or_else(|| ServiceError::new(ServiceErrorKind::Other, "no stage produced source"))
    }

    async fn run_single_call<F>(
        &self,
        description: &str,
        config: &GeneratorConfig,
        stage_delay: Duration,
        emitter: &mut Emitter<F>,
    ) -> Result<String, ServiceError>
    where
        F: FnMut(&PipelineStage) + Send,
    {
        emitter.enter(Stage::Structure);
        let request = GenerationRequest::new(Stage::Structure, description, config.clone());
        let source = self.call(&request).await?;

        for stage in &Stage::WORKING[1..] {
            if !stage_delay.is_zero() {
                tokio::time::sleep(stage_delay).await;
            }
            emitter.enter(*stage);
        }
        Ok(source)
    }

    /// One service call with the response reduced to bare source.
    async fn call(&self, request: &GenerationRequest) -> Result<String, ServiceError> {
        let raw = self.service.generate(request).await?;
        let source = analysis::extract_code(&raw);
        if source.is_empty() {
            return Err(ServiceError::new(
                ServiceErrorKind::InvalidResponse,
                format!("empty response for stage '{}'", request.stage),
            ));
        }
        Ok(source)
    }
}

/// Delivers stage events, refusing regressions and anything after `complete`.
struct Emitter<F> {
    on_stage: F,
    last: Option<Stage>,
}

impl<F: FnMut(&PipelineStage)> Emitter<F> {
    const fn new(on_stage: F) -> Self {
        Self {
            on_stage,
            last: None,
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.deliver(PipelineStage::new(stage));
    }

    fn fail(&mut self, err: &ServiceError) {
        self.deliver(PipelineStage::failed(err.user_message()));
    }

    fn deliver(&mut self, event: PipelineStage) {
        if let Some(last) = self.last {
            if last.is_terminal() || event.stage <= last {
                tracing::trace!(stage = %event.stage, last = %last, "dropping out-of-order stage");
                return;
            }
        }
        tracing::debug!(stage = %event.stage, progress = event.progress, "stage entered");
        self.last = Some(event.stage);
        (self.on_stage)(&event);
    }
}
