//! # loom-core
//!
//! Core functionality for loom - turning AI-generated UI source into runnable projects.
//!
//! A single blob of generated source (an HTML fragment or a component snippet) becomes
//! two artifacts: a framework-appropriate multi-file project for one of five target
//! ecosystems, and a self-contained HTML preview that runs inside a sandboxed frame with
//! no build step.
//!
//! ## Architecture
//!
//! - **Materializers**: one per ecosystem, routed by tech-stack tag ([`MaterializerRouter`])
//! - **Preview**: compiles files or raw source into a sandbox-ready document ([`PreviewCompiler`])
//! - **Orchestrator**: sequences staged calls to an external generation service and
//!   reports ordered progress events
//! - **Pipeline**: validates the tag, runs the orchestrator, materializes the final source
//! - **Error Handling**: one error type with categorization and recovery hints
//!
//! ## Quick Start
//!
//! ```rust
//! use loom_core::{GeneratorConfig, MaterializerRouter, Result};
//!
//! let router = MaterializerRouter::new();
//! let config = GeneratorConfig::default().with_page_type("landing page");
//! let result = router.materialize("react", "<h1>Hello</h1>", &config)?;
//!
//! for file in &result.files {
//!     println!("{} ({})", file.path, file.language);
//! }
//! assert!(result.preview_html.is_some());
//! # Ok::<(), loom_core::Error>(())
//! ```
//!
//! ## Thread Safety
//!
//! Materialization and preview compilation are pure and synchronous. Shared state is
//! limited to lazily compiled regexes, which are immutable once built.

/// Lightweight lexical analysis of generated source
pub mod analysis;
/// Configuration for the generation service and run policy
pub mod config;
/// Error types and result aliases
pub mod error;
/// Per-ecosystem materializers and the router
pub mod materialize;
/// Staged generation against an external service
pub mod orchestrator;
/// Generation followed by materialization
pub mod pipeline;
/// Sandbox-ready preview documents
pub mod preview;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, GenerationConfig, PolicyKind, ServiceConfig};
pub use error::{Error, Result};
pub use materialize::{Materializer, MaterializerRouter};
pub use orchestrator::{GenerationOrchestrator, GenerationPolicy, PipelineStage, Stage};
pub use pipeline::GenerationPipeline;
pub use preview::{PreviewCompiler, SANDBOX_ATTRIBUTES, preview_identity};
pub use types::*;
