use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tracing::debug;

use super::prompt::stage_prompt;
use super::{GenerationRequest, GenerationService, ServiceError, ServiceErrorKind};
use crate::config::ServiceConfig;
use crate::{Error, Result};

/// Response fields that may carry the generated source, in lookup order.
const SOURCE_FIELDS: [&str; 3] = ["source", "content", "text"];

/// Longest body excerpt kept in error messages.
const EXCERPT_LEN: usize = 200;

/// [`GenerationService`] over a JSON HTTP endpoint.
///
/// Each call POSTs `{model, stage, prompt, previous?}` and accepts either a JSON body
/// with a `source`, `content` or `text` string, or a plain-text body.
#[derive(Debug, Clone)]
pub struct HttpGenerationService {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpGenerationService {
    /// Create a service for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("loom/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
        })
    }

    /// Create from the `[service]` config section, reading the API key from the
    /// environment variable it names.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Ok(Self::new(&config.endpoint, &config.model, config.timeout())?.with_api_key(api_key))
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// URL requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<String, ServiceError> {
        let mut body = json!({
            "model": self.model,
            "stage": request.stage,
            "prompt": stage_prompt(request),
        });
        if let Some(previous) = &request.previous {
            body["previous"] = Value::String(previous.clone());
        }

        let mut call = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            call = call.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        debug!(endpoint = %self.endpoint, stage = %request.stage, "calling generation service");
        let response = call.send().await.map_err(classify_transport)?;
        let status = response.status();
        let declared_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("json"));
        let text = response.text().await.map_err(classify_transport)?;

        if !status.is_success() {
            return Err(ServiceError::new(
                classify_status(status),
                format!("HTTP {status}: {}", excerpt(&text)),
            ));
        }
        parse_body(&text, declared_json)
    }
}

/// Map a status code to a failure kind.
#[must_use]
pub fn classify_status(status: StatusCode) -> ServiceErrorKind {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceErrorKind::Timeout,
        StatusCode::TOO_MANY_REQUESTS => ServiceErrorKind::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
            ServiceErrorKind::Misconfigured
        },
        s if s.is_server_error() => ServiceErrorKind::Unavailable,
        _ => ServiceErrorKind::Other,
    }
}

fn classify_transport(err: reqwest::Error) -> ServiceError {
    let kind = if err.is_timeout() {
        ServiceErrorKind::Timeout
    } else if err.is_connect() {
        ServiceErrorKind::Unavailable
    } else if err.is_decode() {
        ServiceErrorKind::InvalidResponse
    } else {
        ServiceErrorKind::Other
    };
    ServiceError::new(kind, err.to_string())
}

/// Pull the generated source out of a successful response body.
///
/// A body declared as JSON must be a JSON object with a source field. Any other body
/// is plain source, unless it happens to parse as such an object.
fn parse_body(text: &str, declared_json: bool) -> std::result::Result<String, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::new(ServiceErrorKind::InvalidResponse, "empty response body"));
    }
    if !declared_json && !trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) if value.is_object() => value,
        Ok(_) | Err(_) if !declared_json => return Ok(trimmed.to_string()),
        Ok(_) => {
            return Err(ServiceError::new(
                ServiceErrorKind::InvalidResponse,
                format!("JSON body is not an object: {}", excerpt(trimmed)),
            ));
        },
        Err(e) => {
            return Err(ServiceError::new(
                ServiceErrorKind::InvalidResponse,
                format!("malformed JSON body: {e}"),
            ));
        },
    };
    SOURCE_FIELDS
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .ok_or_else(|| {
            ServiceError::new(
                ServiceErrorKind::InvalidResponse,
                format!("JSON body has none of the fields {SOURCE_FIELDS:?}: {}", excerpt(trimmed)),
            )
        })
}

fn excerpt(text: &str) -> String {
    let text = text.trim();
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
