//! Self-contained HTML previews for generated projects.
//!
//! [`PreviewCompiler`] turns either a file list or a single raw source blob into one
//! HTML document that runs in a sandboxed frame without any build step. Runtimes are
//! loaded from CDNs, the user code is inlined, and every failure mode ends in an inline
//! error banner or a static-preview badge rather than an error value.
//!
//! Documents are never patched: each compile returns a complete replacement, and hosts
//! should remount their frame when [`preview_identity`] changes.

pub mod blocks;
pub mod component;
pub mod document;
pub mod rules;
pub mod svelte;
pub mod vue;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

pub use document::SANDBOX_ATTRIBUTES;
pub use rules::{MainFileRule, find_main_file, main_file_rules};

use crate::analysis;
use crate::types::{GeneratedFile, RenderFamily, TechStack};

const DEFAULT_TITLE: &str = "Preview";

/// Compiles generated source into a runnable preview document.
#[derive(Debug, Clone)]
pub struct PreviewCompiler {
    title: String,
}

impl Default for PreviewCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewCompiler {
    /// Compiler titling its documents "Preview".
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Use `title` for generated documents. Full static documents keep their own.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Compile a project's files, selecting the main file by the stack's rule table.
    ///
    /// Without any matching file the loading placeholder is returned.
    #[must_use]
    pub fn compile(&self, files: &[GeneratedFile], framework: TechStack) -> String {
        let Some(main) = find_main_file(files, framework) else {
            tracing::debug!(%framework, files = files.len(), "no main file, using placeholder");
            return document::loading_placeholder();
        };
        self.compile_source(&main.content, framework)
    }

    /// Compile one raw source blob as the main file of `framework`.
    #[must_use]
    pub fn compile_source(&self, raw: &str, framework: TechStack) -> String {
        if raw.trim().is_empty() {
            return document::loading_placeholder();
        }
        match framework.family() {
            RenderFamily::Static if analysis::has_doctype(raw) => document::ensure_tailwind(raw),
            RenderFamily::Static => document::html_shell(&self.title, raw),
            RenderFamily::Component => component::render(raw, &self.title),
            RenderFamily::SingleFileComponent if framework == TechStack::Vue => {
                vue::render(raw, &self.title)
            },
            RenderFamily::SingleFileComponent => svelte::render(raw, &self.title),
        }
    }
}

/// URL-safe SHA-256 digest of a preview document.
///
/// Hosts key their sandboxed frame on this value so a changed document always forces a
/// full reload.
///
/// ```rust
/// use loom_core::preview::preview_identity;
///
/// let key = preview_identity("<!DOCTYPE html><p>x</p>");
/// assert_eq!(key, preview_identity("<!DOCTYPE html><p>x</p>"));
/// assert_ne!(key, preview_identity("<!DOCTYPE html><p>y</p>"));
/// assert_eq!(key.len(), 43);
/// ```
#[must_use]
pub fn preview_identity(document: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> GeneratedFile {
        GeneratedFile::new(path, content)
    }

    #[test]
    fn test_empty_inputs_yield_placeholder() {
        let compiler = PreviewCompiler::new();
        for stack in TechStack::ALL {
            assert_eq!(compiler.compile(&[], stack), document::loading_placeholder());
            assert_eq!(compiler.compile_source("   ", stack), document::loading_placeholder());
        }
    }

    #[test]
    fn test_static_document_passes_through_with_css() {
        let doc = "<!DOCTYPE html><html><head><title>Mine</title></head><body>x</body></html>";
        let out = PreviewCompiler::new().compile(&[file("index.html", doc)], TechStack::Html);
        assert!(out.contains("<title>Mine</title>"));
        assert!(out.contains(document::TAILWIND_CDN));
    }

    #[test]
    fn test_component_family_uses_main_file() {
        let files = [
            file("src/components/Card.tsx", "export default function Card() { return null; }"),
            file("src/App.tsx", "export default function App() { return <Card/>; }"),
            file("package.json", "{}"),
        ];
        let out = PreviewCompiler::new().compile(&files, TechStack::React);
        assert!(out.contains(r#"var componentName = "App";"#));
    }

    #[test]
    fn test_sfc_families() {
        let compiler = PreviewCompiler::new().with_title("Shop");
        let vue = compiler.compile(&[file("src/App.vue", "<template><p>v</p></template>")], TechStack::Vue);
        assert!(vue.contains(document::VUE_CDN));
        assert!(vue.contains("<title>Shop</title>"));

        let svelte = compiler.compile(&[file("src/App.svelte", "<p>{name}</p>")], TechStack::Svelte);
        assert!(svelte.contains("<p>…</p>"));
        assert!(svelte.contains("Static preview"));
    }

    #[test]
    fn test_every_document_loads_utility_css() {
        let compiler = PreviewCompiler::new();
        for stack in TechStack::ALL {
            let out = compiler.compile_source("<div>hello</div>", stack);
            assert!(out.contains(document::TAILWIND_CDN), "{stack}");
            assert!(out.to_ascii_lowercase().starts_with("<!doctype html>"), "{stack}");
        }
    }

    #[test]
    fn test_preview_identity_is_url_safe() {
        let key = preview_identity("anything at all");
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}
