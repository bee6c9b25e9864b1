//! The external generation service seam.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Stage;
use crate::types::GeneratorConfig;

/// One call to the generation service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Stage being worked on.
    pub stage: Stage,
    /// What the user asked for.
    pub description: String,
    /// Generation options.
    pub config: GeneratorConfig,
    /// Source produced by the previous call, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl GenerationRequest {
    /// Request for `stage` with no previous source.
    #[must_use]
    pub fn new(stage: Stage, description: impl Into<String>, config: GeneratorConfig) -> Self {
        Self {
            stage,
            description: description.into(),
            config,
            previous: None,
        }
    }

    /// Attach the previous stage's source.
    #[must_use]
    pub fn with_previous(mut self, previous: Option<String>) -> Self {
        self.previous = previous;
        self
    }
}

/// Produces raw UI source for a request (allows mocking in tests).
///
/// Implementations own their transport concerns (deadlines, authentication) and
/// classify failures into a [`ServiceErrorKind`].
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// Generate raw source for `request`.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ServiceError>;
}

/// Classification of a generation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    /// The service did not answer within its deadline.
    Timeout,
    /// The service refused the call because of rate limiting.
    RateLimited,
    /// Endpoint, model or credentials are wrong.
    Misconfigured,
    /// The service could not be reached or failed internally.
    Unavailable,
    /// The service answered with something that is not source code.
    InvalidResponse,
    /// Anything else.
    Other,
}

impl ServiceErrorKind {
    /// Stable tag used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::Misconfigured => "misconfigured",
            Self::Unavailable => "unavailable",
            Self::InvalidResponse => "invalid_response",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error from the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    /// Failure classification.
    pub kind: ServiceErrorKind,
    /// Detail for logs.
    pub message: String,
}

impl ServiceError {
    /// Create a new service error.
    #[must_use]
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Message suitable for the user, chosen by classification.
    ///
    /// This is what the terminal `complete` stage carries in its `error` field.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self.kind {
            ServiceErrorKind::Timeout => {
                "Generation timed out. Try a shorter description or try again."
            },
            ServiceErrorKind::RateLimited => {
                "Too many generation requests. Please wait a moment and try again."
            },
            ServiceErrorKind::Misconfigured => {
                "The generation service is not configured correctly. Check the endpoint, model and API key."
            },
            ServiceErrorKind::Unavailable => {
                "The generation service is unavailable right now. Please try again later."
            },
            ServiceErrorKind::InvalidResponse => {
                "The generation service returned an unexpected response."
            },
            ServiceErrorKind::Other => "Generation failed. Please try again.",
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.user_message(), self.kind, self.message)
    }
}

impl std::error::Error for ServiceError {}
