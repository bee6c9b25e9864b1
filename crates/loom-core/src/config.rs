//! Configuration for the generation service and run policy.
//!
//! Configuration lives in a TOML file in the platform config directory. A missing file
//! means defaults; CLI flags override individual values after loading.
//!
//! ## File Location
//!
//! - `$LOOM_CONFIG` if set (path to the file itself)
//! - `$LOOM_CONFIG_DIR/config.toml` if set
//! - otherwise the platform directory, e.g. `~/.config/loom/config.toml` on Linux
//!
//! ## Example Configuration File
//!
//! ```toml
//! [service]
//! endpoint = "http://127.0.0.1:8787/generate"
//! model = "default"
//! api_key_env = "LOOM_API_KEY"
//! timeout_secs = 120
//!
//! [generation]
//! policy = "single_call"
//! stage_delay_ms = 400
//! ```
//!
//! ## Loading
//!
//! ```rust
//! use loom_core::{Config, Result};
//!
//! let config = Config::load()?;
//! println!("Generating against {}", config.service.endpoint);
//! # Ok::<(), loom_core::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::orchestrator::GenerationPolicy;
use crate::{Error, Result};

/// Environment variable naming the config file directly.
pub const CONFIG_ENV: &str = "LOOM_CONFIG";
/// Environment variable naming the directory holding `config.toml`.
pub const CONFIG_DIR_ENV: &str = "LOOM_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation service connection settings.
    pub service: ServiceConfig,
    /// Run policy.
    pub generation: GenerationConfig,
}

/// `[service]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// URL the generation requests are POSTed to.
    pub endpoint: String,
    /// Model identifier passed through to the service.
    pub model: String,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
    /// Per-request deadline in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8787/generate".to_string(),
            model: "default".to_string(),
            api_key_env: "LOOM_API_KEY".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ServiceConfig {
    /// Per-request deadline.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which orchestrator policy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// One service call per working stage.
    PerStage,
    /// One service call with simulated stage pacing.
    #[default]
    SingleCall,
}

/// `[generation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Call policy.
    pub policy: PolicyKind,
    /// Pause between simulated stages of the single-call policy.
    pub stage_delay_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::SingleCall,
            stage_delay_ms: 400,
        }
    }
}

impl GenerationConfig {
    /// The orchestrator policy this section describes.
    #[must_use]
    pub const fn policy(&self) -> GenerationPolicy {
        match self.policy {
            PolicyKind::PerStage => GenerationPolicy::PerStage,
            PolicyKind::SingleCall => GenerationPolicy::SingleCall {
                stage_delay: Duration::from_millis(self.stage_delay_ms),
            },
        }
    }
}

impl Config {
    /// Load from the default location, or defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or the file
    /// exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save to an explicit file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the directory cannot be created or the file cannot
    /// be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;
        Ok(())
    }

    /// Path of the config file, honoring the environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform config directory cannot
    /// be determined.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(file) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(file));
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir).join(CONFIG_FILE));
        }
        let project_dirs = directories::ProjectDirs::from("dev", "loom", "loom")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(project_dirs.config_dir().join(CONFIG_FILE))
    }
}
