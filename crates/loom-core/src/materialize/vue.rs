use super::scaffold::{self, POSTCSS_CONFIG, indent};
use super::{Materializer, assemble};
use crate::preview::{PreviewCompiler, blocks};
use crate::types::{GenerationResult, GeneratorConfig, TechStack};

const ENTRY: &str = "src/App.vue";

const MAIN_TS: &str = r"import { createApp } from 'vue';
import App from './App.vue';
import './style.css';

createApp(App).mount('#app');
";

/// Vue 3 single-file components on Vite.
#[derive(Debug, Default, Clone, Copy)]
pub struct VueMaterializer;

impl Materializer for VueMaterializer {
    fn stack(&self) -> TechStack {
        TechStack::Vue
    }

    fn materialize(&self, raw: &str, config: &GeneratorConfig) -> GenerationResult {
        let title = config.page_title();
        let files = vec![
            ("index.html", scaffold::vite_index_html(&title, "app", "/src/main.ts")),
            ("src/main.ts", MAIN_TS.to_string()),
            (ENTRY, single_file_component(raw)),
            ("src/style.css", scaffold::global_css()),
            ("package.json", scaffold::package_json(TechStack::Vue, &config.project_name())),
            ("vite.config.ts", scaffold::vite_config(TechStack::Vue)),
            (
                "tailwind.config.js",
                scaffold::tailwind_config(&["./index.html", "./src/**/*.{vue,js,ts,jsx,tsx}"]),
            ),
            ("postcss.config.js", POSTCSS_CONFIG.to_string()),
            ("tsconfig.json", scaffold::tsconfig(TechStack::Vue)),
        ];
        let mut result = assemble(TechStack::Vue, files, ENTRY, None);
        result.preview_html =
            Some(PreviewCompiler::new().with_title(title).compile(&result.files, TechStack::Vue));
        result
    }
}

/// Ensure the source has a `<template>` block.
///
/// Script and style blocks of an unwrapped source are kept around the new template.
fn single_file_component(raw: &str) -> String {
    if blocks::template(raw).is_some() {
        return raw.to_string();
    }

    let mut sections = Vec::new();
    for script in blocks::scripts(raw) {
        sections.push(format!("<script{}>{}</script>", script.attrs, script.body));
    }
    let markup = blocks::strip_script_and_style(raw);
    sections.push(format!("<template>\n{}\n</template>", indent(markup.trim(), 2)));
    for style in blocks::styles(raw) {
        sections.push(format!("<style{}>{}</style>", style.attrs, style.body));
    }
    let mut sfc = sections.join("\n\n");
    sfc.push('\n');
    sfc
}
