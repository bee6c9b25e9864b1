//! Per-stage instructions sent to the generation service.

use std::fmt::Write as _;

use super::{GenerationRequest, Stage};
use crate::types::{GeneratorConfig, TechStack};

/// Instruction for what a stage should add to the page.
#[must_use]
pub const fn stage_instruction(stage: Stage) -> &'static str {
    match stage {
        Stage::Preparing | Stage::Structure => {
            "Produce the complete page structure with semantic markup and realistic content."
        },
        Stage::Styling => {
            "Refine the styling with Tailwind utility classes: spacing, typography, color and responsive layout."
        },
        Stage::Interactions => {
            "Add interactivity where it helps: state, event handlers, hover and focus states."
        },
        Stage::Polishing | Stage::Complete => {
            "Polish the result: accessibility attributes, consistent spacing and final visual details."
        },
    }
}

/// What the output must look like for a stack.
const fn output_contract(stack: Option<TechStack>) -> &'static str {
    match stack {
        Some(TechStack::Html) | None => {
            "Return a single HTML document or fragment that uses Tailwind CSS classes."
        },
        Some(TechStack::React) => {
            "Return a single React function component in TSX with a default export, styled with Tailwind CSS."
        },
        Some(TechStack::Nextjs) => {
            "Return a single Next.js app router page component in TSX with a default export, styled with Tailwind CSS."
        },
        Some(TechStack::Vue) => {
            "Return a single Vue 3 single-file component using <script setup> and a <template>, styled with Tailwind CSS."
        },
        Some(TechStack::Svelte) => {
            "Return a single Svelte component with an optional <script> block, styled with Tailwind CSS."
        },
    }
}

/// Build the prompt for one service call.
///
/// The description and stage instruction always appear; interpreted config fields and
/// passthrough hints follow; later stages carry the previous source to refine.
#[must_use]
pub fn stage_prompt(request: &GenerationRequest) -> String {
    let config = &request.config;
    let stack = config
        .tech_stack
        .as_deref()
        .and_then(|tag| tag.parse::<TechStack>().ok());

    let mut prompt = String::new();
    let _ = writeln!(prompt, "Build a web page: {}", request.description.trim());
    let _ = writeln!(prompt, "Page type: {}", config.page_title());
    let _ = writeln!(prompt, "{}", output_contract(stack));

    let hints = hints(config);
    if !hints.is_empty() {
        prompt.push_str("\nPreferences:\n");
        for (label, value) in hints {
            let _ = writeln!(prompt, "- {label}: {value}");
        }
    }

    let _ = write!(prompt, "\nStage '{}': {}", request.stage, stage_instruction(request.stage));

    if let Some(previous) = request.previous.as_deref() {
        let _ = write!(
            prompt,
            "\n\nCurrent source to refine (return the full updated source):\n```\n{previous}\n```"
        );
    }
    prompt.push_str("\n\nRespond with code only, in one fenced code block.");
    prompt
}

fn hints(config: &GeneratorConfig) -> Vec<(&'static str, String)> {
    let mut hints = Vec::new();
    let fields = [
        ("Styling", &config.styling),
        ("Design system", &config.design_system),
        ("Color palette", &config.color_palette),
        ("Interaction level", &config.interaction_level),
        ("Navigation", &config.nav_type),
    ];
    for (label, value) in fields {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            hints.push((label, value.to_string()));
        }
    }
    if !config.features.is_empty() {
        hints.push(("Features", config.features.join(", ")));
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(stage: Stage, config: GeneratorConfig) -> GenerationRequest {
        GenerationRequest::new(stage, "a coffee shop landing page", config)
    }

    #[test]
    fn test_structure_prompt_mentions_stack_and_description() {
        let config = GeneratorConfig::default()
            .with_tech_stack("vue")
            .with_page_type("landing");
        let prompt = stage_prompt(&request(Stage::Structure, config));
        assert!(prompt.starts_with("Build a web page: a coffee shop landing page\n"));
        assert!(prompt.contains("Page type: Landing"));
        assert!(prompt.contains("<script setup>"));
        assert!(prompt.contains("Stage 'structure'"));
        assert!(!prompt.contains("Current source"));
    }

    #[test]
    fn test_hints_are_listed_when_present() {
        let config = GeneratorConfig {
            color_palette: Some("warm browns".into()),
            features: vec!["menu".into(), "map".into()],
            styling: Some("  ".into()),
            ..GeneratorConfig::default()
        };
        let prompt = stage_prompt(&request(Stage::Styling, config));
        assert!(prompt.contains("- Color palette: warm browns"));
        assert!(prompt.contains("- Features: menu, map"));
        assert!(!prompt.contains("- Styling"));
    }

    #[test]
    fn test_refinement_includes_previous_source() {
        let req = request(Stage::Polishing, GeneratorConfig::default())
            .with_previous(Some("<main>v1</main>".into()));
        let prompt = stage_prompt(&req);
        assert!(prompt.contains("```\n<main>v1</main>\n```"));
        assert!(prompt.contains(stage_instruction(Stage::Polishing)));
    }

    #[test]
    fn test_unknown_stack_falls_back_to_html_contract() {
        let config = GeneratorConfig::default().with_tech_stack("angular");
        assert!(stage_prompt(&request(Stage::Structure, config)).contains("single HTML document"));
    }
}
