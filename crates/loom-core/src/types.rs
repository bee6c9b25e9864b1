//! Core data types shared by the router, materializers, preview compiler and
//! orchestrator.
//!
//! Everything here is a plain value: results are never mutated after they are built
//! and carry no handles, so callers may cache or discard them freely.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One of the five supported target ecosystems.
///
/// The wire tags are `html`, `react`, `nextjs`, `vue` and `svelte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechStack {
    /// A single static HTML document.
    Html,
    /// React on a standalone build tool (Vite).
    React,
    /// React on the file-routed Next.js framework.
    Nextjs,
    /// Vue single-file components.
    Vue,
    /// Svelte single-file components.
    Svelte,
}

impl TechStack {
    /// All stacks in canonical order.
    pub const ALL: [Self; 5] = [Self::Html, Self::React, Self::Nextjs, Self::Vue, Self::Svelte];

    /// Wire tag of this stack.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::React => "react",
            Self::Nextjs => "nextjs",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Html => "Static HTML",
            Self::React => "React (Vite)",
            Self::Nextjs => "Next.js",
            Self::Vue => "Vue",
            Self::Svelte => "Svelte",
        }
    }

    /// How previews for this stack are rendered.
    #[must_use]
    pub const fn family(self) -> RenderFamily {
        match self {
            Self::Html => RenderFamily::Static,
            Self::React | Self::Nextjs => RenderFamily::Component,
            Self::Vue | Self::Svelte => RenderFamily::SingleFileComponent,
        }
    }
}

impl fmt::Display for TechStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechStack {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingTechStack);
        }
        Self::ALL
            .into_iter()
            .find(|stack| stack.as_str() == trimmed)
            .ok_or_else(|| Error::UnknownTechStack(trimmed.to_string()))
    }
}

/// Preview rendering family of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFamily {
    /// Markup rendered as-is.
    Static,
    /// JSX components mounted by an in-browser runtime.
    Component,
    /// Declarative single-file components.
    SingleFileComponent,
}

/// Language tag of a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// `.html` documents.
    Html,
    /// Stylesheets.
    Css,
    /// Plain JavaScript, including `.cjs` and `.mjs` configs.
    Javascript,
    /// TypeScript modules.
    Typescript,
    /// JavaScript with JSX.
    Jsx,
    /// TypeScript with JSX.
    Tsx,
    /// Manifests and compiler configs.
    Json,
    /// Vue single-file components.
    Vue,
    /// Svelte components.
    Svelte,
    /// Markdown text.
    Markdown,
}

impl Language {
    /// Infer the language from a file path extension.
    ///
    /// Unknown extensions are treated as JavaScript, which is what the remaining
    /// scaffold files (`*.cjs`, `*.mjs`) are.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let ext = path.rsplit_once('.').map_or("", |(_, ext)| ext);
        match ext {
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "ts" | "mts" | "cts" => Self::Typescript,
            "jsx" => Self::Jsx,
            "tsx" => Self::Tsx,
            "json" => Self::Json,
            "vue" => Self::Vue,
            "svelte" => Self::Svelte,
            "md" => Self::Markdown,
            _ => Self::Javascript,
        }
    }

    /// Wire tag of this language.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
            Self::Json => "json",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single file of a materialized project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Path relative to the project root.
    pub path: String,
    /// File content.
    pub content: String,
    /// Language tag.
    pub language: Language,
}

impl GeneratedFile {
    /// Create a file, inferring the language from the path.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let language = Language::from_path(&path);
        Self {
            path,
            content: content.into(),
            language,
        }
    }
}

/// Output of a materializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// Project files, paths unique.
    pub files: Vec<GeneratedFile>,
    /// Path of the file a preview starts from.
    pub preview_entry: String,
    /// Stack the files were produced for.
    pub framework: TechStack,
    /// A complete renderable HTML document, when the materializer produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_html: Option<String>,
}

impl GenerationResult {
    /// Look up a file by path.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// The file named by `preview_entry`.
    #[must_use]
    pub fn entry_file(&self) -> Option<&GeneratedFile> {
        self.file(&self.preview_entry)
    }

    /// Check the result invariants: unique paths, and a preview entry that names a
    /// present file whenever there are files.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.files.len());
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(Error::Other(format!("duplicate file path '{}'", file.path)));
            }
        }
        if !self.files.is_empty() && !seen.contains(self.preview_entry.as_str()) {
            return Err(Error::Other(format!(
                "preview entry '{}' is not among the generated files",
                self.preview_entry
            )));
        }
        Ok(())
    }
}

/// Generation options chosen by the user.
///
/// Only `tech_stack` and `page_type` are interpreted by the core; the rest are carried
/// through to the generation service as prompt hints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Tech-stack tag (`html`, `react`, `nextjs`, `vue`, `svelte`).
    pub tech_stack: Option<String>,
    /// Styling approach, e.g. `tailwind`.
    pub styling: Option<String>,
    /// Design system to follow.
    pub design_system: Option<String>,
    /// Preferred color palette.
    pub color_palette: Option<String>,
    /// How interactive the page should be.
    pub interaction_level: Option<String>,
    /// Features to include.
    pub features: Vec<String>,
    /// Kind of page; drives the project name and page title.
    pub page_type: Option<String>,
    /// Navigation style.
    pub nav_type: Option<String>,
}

impl GeneratorConfig {
    /// Set the page type.
    #[must_use]
    pub fn with_page_type(mut self, page_type: impl Into<String>) -> Self {
        self.page_type = Some(page_type.into());
        self
    }

    /// Set the tech stack tag.
    #[must_use]
    pub fn with_tech_stack(mut self, tag: impl Into<String>) -> Self {
        self.tech_stack = Some(tag.into());
        self
    }

    /// Kebab-case project name derived from the page type.
    ///
    /// ```rust
    /// use loom_core::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default().with_page_type("Landing Page");
    /// assert_eq!(config.project_name(), "landing-page");
    /// assert_eq!(GeneratorConfig::default().project_name(), "generated-app");
    /// ```
    #[must_use]
    pub fn project_name(&self) -> String {
        let words = self.page_type_words();
        if words.is_empty() {
            "generated-app".to_string()
        } else {
            words.join("-").to_lowercase()
        }
    }

    /// Title Case page title derived from the page type.
    #[must_use]
    pub fn page_title(&self) -> String {
        let words = self.page_type_words();
        if words.is_empty() {
            return "Generated Page".to_string();
        }
        words
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn page_type_words(&self) -> Vec<&str> {
        self.page_type
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tech_stack_parse_round_trip() {
        for stack in TechStack::ALL {
            assert_eq!(stack.as_str().parse::<TechStack>().unwrap(), stack);
        }
    }

    #[test]
    fn test_tech_stack_parse_rejects_empty_and_unknown() {
        assert!(matches!("".parse::<TechStack>(), Err(Error::MissingTechStack)));
        assert!(matches!("   ".parse::<TechStack>(), Err(Error::MissingTechStack)));
        assert!(matches!(
            "angular".parse::<TechStack>(),
            Err(Error::UnknownTechStack(tag)) if tag == "angular"
        ));
        // Tags are case-sensitive
        assert!("React".parse::<TechStack>().is_err());
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(Language::from_path("index.html"), Language::Html);
        assert_eq!(Language::from_path("src/App.tsx"), Language::Tsx);
        assert_eq!(Language::from_path("src/App.vue"), Language::Vue);
        assert_eq!(Language::from_path("package.json"), Language::Json);
        assert_eq!(Language::from_path("next-env.d.ts"), Language::Typescript);
        assert_eq!(Language::from_path("postcss.config.js"), Language::Javascript);
        assert_eq!(Language::from_path("Makefile"), Language::Javascript);
    }

    #[test]
    fn test_generation_result_serializes_camel_case() {
        let result = GenerationResult {
            files: vec![GeneratedFile::new("index.html", "<p>x</p>")],
            preview_entry: "index.html".into(),
            framework: TechStack::Html,
            preview_html: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["previewEntry"], "index.html");
        assert_eq!(json["framework"], "html");
        assert_eq!(json["files"][0]["language"], "html");
        assert!(json.get("previewHtml").is_none());
    }

    #[test]
    fn test_validate_catches_duplicates_and_missing_entry() {
        let mut result = GenerationResult {
            files: vec![GeneratedFile::new("a.html", ""), GeneratedFile::new("a.html", "")],
            preview_entry: "a.html".into(),
            framework: TechStack::Html,
            preview_html: None,
        };
        assert!(result.validate().is_err());

        result.files.pop();
        assert!(result.validate().is_ok());

        result.preview_entry = "missing.html".into();
        assert!(result.validate().is_err());

        result.files.clear();
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_config_names() {
        let config = GeneratorConfig::default().with_page_type("saas_dashboard");
        assert_eq!(config.project_name(), "saas-dashboard");
        assert_eq!(config.page_title(), "Saas Dashboard");
        assert_eq!(GeneratorConfig::default().page_title(), "Generated Page");
    }

    #[test]
    fn test_config_deserializes_partial_json() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"techStack":"vue","features":["auth"]}"#).unwrap();
        assert_eq!(config.tech_stack.as_deref(), Some("vue"));
        assert_eq!(config.features, vec!["auth".to_string()]);
        assert!(config.page_type.is_none());
    }
}
