use super::{Materializer, assemble};
use crate::analysis;
use crate::preview::document;
use crate::types::{GenerationResult, GeneratorConfig, TechStack};

const ENTRY: &str = "index.html";

/// Single static document. Full documents pass through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMaterializer;

impl Materializer for HtmlMaterializer {
    fn stack(&self) -> TechStack {
        TechStack::Html
    }

    fn materialize(&self, raw: &str, config: &GeneratorConfig) -> GenerationResult {
        let content = if analysis::has_doctype(raw) {
            raw.to_string()
        } else {
            document::html_shell(&config.page_title(), raw.trim())
        };
        let preview = content.clone();
        assemble(TechStack::Html, vec![(ENTRY, content)], ENTRY, Some(preview))
    }
}
