//! Error types and handling for loom-core operations.
//!
//! Materializers and the preview compiler never fail: they degrade to a documented
//! fallback instead. The only hard failures in the core are input validation at the
//! router (a missing or unknown tech-stack tag), configuration loading, and failures
//! reported by the external generation service.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: missing/unknown tech-stack tag, unreadable config files
//! - **Generation Errors**: the generation service failed (timeout, rate limit, ...)
//! - **I/O and Serialization Errors**: config persistence and result serialization
//!
//! ## Recovery Hints
//!
//! ```rust
//! use loom_core::{Error, MaterializerRouter, GeneratorConfig};
//!
//! let router = MaterializerRouter::new();
//! match router.materialize("", "<div>Hi</div>", &GeneratorConfig::default()) {
//!     Err(e) if e.is_recoverable() => println!("temporary failure: {e}"),
//!     Err(e) => println!("fatal {} error: {e}", e.category()),
//!     Ok(result) => println!("{} files", result.files.len()),
//! }
//! ```

use thiserror::Error;

use crate::orchestrator::{ServiceError, ServiceErrorKind};

/// The main error type for loom-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No tech-stack tag was supplied.
    ///
    /// Fatal and synchronous: the router refuses to pick a materializer on its own.
    #[error("Configuration error: a tech stack is required (one of: html, react, nextjs, vue, svelte)")]
    MissingTechStack,

    /// The tech-stack tag is not one of the five supported identifiers.
    #[error("Configuration error: unknown tech stack '{0}' (expected one of: html, react, nextjs, vue, svelte)")]
    UnknownTechStack(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Config directory cannot be determined or created
    #[error("Configuration error: {0}")]
    Config(String),

    /// The external generation service failed.
    ///
    /// The orchestrator has already emitted a terminal `complete` stage carrying the
    /// classified message by the time this error is returned.
    #[error("Generation failed: {0}")]
    Generation(#[from] ServiceError),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might succeed on a later attempt.
    ///
    /// Only transient generation failures qualify. The orchestrator itself never
    /// retries; this hint is for the caller deciding whether to offer "try again".
    ///
    /// ```rust
    /// use loom_core::Error;
    /// use loom_core::orchestrator::{ServiceError, ServiceErrorKind};
    ///
    /// let rate_limited = Error::Generation(ServiceError::new(ServiceErrorKind::RateLimited, "429"));
    /// assert!(rate_limited.is_recoverable());
    /// assert!(!Error::MissingTechStack.is_recoverable());
    /// ```
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Generation(err) => matches!(
                err.kind,
                ServiceErrorKind::Timeout
                    | ServiceErrorKind::RateLimited
                    | ServiceErrorKind::Unavailable
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::MissingTechStack | Self::UnknownTechStack(_) | Self::Config(_) => "config",
            Self::Generation(_) => "generation",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
