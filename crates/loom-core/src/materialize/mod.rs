//! Per-ecosystem materializers and the router that selects between them.
//!
//! A materializer is a pure function from raw generated source (plus the user's
//! [`GeneratorConfig`]) to a complete multi-file project. Materializers never fail:
//! input they cannot recognize is wrapped as-is. The only hard failure is a missing or
//! unknown tech-stack tag, reported by [`MaterializerRouter::materialize`].

mod component;
mod html;
mod nextjs;
mod react;
pub(crate) mod scaffold;
mod svelte;
mod vue;

pub use html::HtmlMaterializer;
pub use nextjs::NextjsMaterializer;
pub use react::ReactMaterializer;
pub use svelte::SvelteMaterializer;
pub use vue::VueMaterializer;

use crate::error::Result;
use crate::types::{GeneratedFile, GenerationResult, GeneratorConfig, TechStack};

/// Converts raw source into a project for one ecosystem.
pub trait Materializer: Send + Sync {
    /// The stack this materializer targets.
    fn stack(&self) -> TechStack;

    /// Produce a fresh result. Identical inputs give byte-identical output.
    fn materialize(&self, raw: &str, config: &GeneratorConfig) -> GenerationResult;
}

/// Validates tech-stack tags and dispatches to the matching materializer.
///
/// ```rust
/// use loom_core::{GeneratorConfig, MaterializerRouter};
///
/// let router = MaterializerRouter::new();
/// let result = router.materialize("html", "<div>Hi</div>", &GeneratorConfig::default())?;
/// assert_eq!(result.preview_entry, "index.html");
/// assert!(result.files[0].content.contains("<div>Hi</div>"));
/// # Ok::<(), loom_core::Error>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterializerRouter;

impl MaterializerRouter {
    /// Create a router over the built-in materializers.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether `tag` is one of the supported tech-stack identifiers.
    #[must_use]
    pub fn is_known_tech_stack(tag: &str) -> bool {
        tag.parse::<TechStack>().is_ok()
    }

    /// The supported tags in canonical order.
    #[must_use]
    pub fn supported_stacks() -> [&'static str; 5] {
        TechStack::ALL.map(TechStack::as_str)
    }

    /// Materialize `raw` for the stack named by `tech_stack`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTechStack`](crate::Error::MissingTechStack) for an empty tag and
    /// [`Error::UnknownTechStack`](crate::Error::UnknownTechStack) for anything outside
    /// the supported set. Both are fatal.
    pub fn materialize(
        &self,
        tech_stack: &str,
        raw: &str,
        config: &GeneratorConfig,
    ) -> Result<GenerationResult> {
        let stack: TechStack = tech_stack.parse()?;
        Ok(self.materialize_stack(stack, raw, config))
    }

    /// Materialize `raw` for an already validated stack.
    #[must_use]
    pub fn materialize_stack(
        &self,
        stack: TechStack,
        raw: &str,
        config: &GeneratorConfig,
    ) -> GenerationResult {
        let result = materializer_for(stack).materialize(raw, config);
        tracing::debug!(
            stack = %stack,
            files = result.files.len(),
            preview = result.preview_html.is_some(),
            "materialized project"
        );
        result
    }
}

/// The materializer for `stack`.
#[must_use]
pub fn materializer_for(stack: TechStack) -> &'static dyn Materializer {
    match stack {
        TechStack::Html => &HtmlMaterializer,
        TechStack::React => &ReactMaterializer,
        TechStack::Nextjs => &NextjsMaterializer,
        TechStack::Vue => &VueMaterializer,
        TechStack::Svelte => &SvelteMaterializer,
    }
}

/// Assemble a result from `(path, content)` pairs.
fn assemble(
    stack: TechStack,
    files: Vec<(&str, String)>,
    preview_entry: &str,
    preview_html: Option<String>,
) -> GenerationResult {
    GenerationResult {
        files: files
            .into_iter()
            .map(|(path, content)| GeneratedFile::new(path, content))
            .collect(),
        preview_entry: preview_entry.to_string(),
        framework: stack,
        preview_html,
    }
}
