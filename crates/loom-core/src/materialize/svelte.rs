use super::scaffold::{self, POSTCSS_CONFIG};
use super::{Materializer, assemble};
use crate::preview::{PreviewCompiler, blocks};
use crate::types::{GenerationResult, GeneratorConfig, TechStack};

const ENTRY: &str = "src/App.svelte";

const MAIN_TS: &str = r"import './app.css';
import App from './App.svelte';

const app = new App({
  target: document.getElementById('app')!,
});

export default app;
";

const SVELTE_CONFIG: &str = r"import { vitePreprocess } from '@sveltejs/vite-plugin-svelte';

export default {
  preprocess: vitePreprocess(),
};
";

const EMPTY_SCRIPT: &str = "<script lang=\"ts\">\n</script>\n\n";

/// Svelte 4 components on Vite.
#[derive(Debug, Default, Clone, Copy)]
pub struct SvelteMaterializer;

impl Materializer for SvelteMaterializer {
    fn stack(&self) -> TechStack {
        TechStack::Svelte
    }

    fn materialize(&self, raw: &str, config: &GeneratorConfig) -> GenerationResult {
        let title = config.page_title();
        let files = vec![
            ("index.html", scaffold::vite_index_html(&title, "app", "/src/main.ts")),
            ("src/main.ts", MAIN_TS.to_string()),
            (ENTRY, single_file_component(raw)),
            ("src/app.css", scaffold::global_css()),
            ("package.json", scaffold::package_json(TechStack::Svelte, &config.project_name())),
            ("vite.config.ts", scaffold::vite_config(TechStack::Svelte)),
            ("svelte.config.js", SVELTE_CONFIG.to_string()),
            (
                "tailwind.config.js",
                scaffold::tailwind_config(&["./index.html", "./src/**/*.{svelte,js,ts}"]),
            ),
            ("postcss.config.js", POSTCSS_CONFIG.to_string()),
            ("tsconfig.json", scaffold::tsconfig(TechStack::Svelte)),
        ];
        let mut result = assemble(TechStack::Svelte, files, ENTRY, None);
        result.preview_html =
            Some(PreviewCompiler::new().with_title(title).compile(&result.files, TechStack::Svelte));
        result
    }
}

/// Components without a `<script>` block get an empty one prepended.
fn single_file_component(raw: &str) -> String {
    if blocks::scripts(raw).is_empty() {
        format!("{EMPTY_SCRIPT}{}\n", raw.trim())
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_svelte_scaffold() {
        let result = SvelteMaterializer.materialize("<h1>Hi</h1>", &GeneratorConfig::default());
        let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "index.html",
                "src/main.ts",
                "src/App.svelte",
                "src/app.css",
                "package.json",
                "vite.config.ts",
                "svelte.config.js",
                "tailwind.config.js",
                "postcss.config.js",
                "tsconfig.json",
            ]
        );
        assert_eq!(result.preview_entry, "src/App.svelte");
    }

    #[test]
    fn test_fragment_gets_script_block() {
        assert_eq!(
            single_file_component("<h1>Hi</h1>"),
            "<script lang=\"ts\">\n</script>\n\n<h1>Hi</h1>\n"
        );
    }

    #[test]
    fn test_component_with_script_is_untouched() {
        let raw = "<script>\n  let name = 'x';\n</script>\n\n<h1>{name}</h1>";
        assert_eq!(single_file_component(raw), raw);
    }

    #[test]
    fn test_preview_is_static_with_badge() {
        let result = SvelteMaterializer.materialize(
            "<script>let n = 0;</script><button on:click={() => n++}>{n}</button>",
            &GeneratorConfig::default(),
        );
        let preview = result.preview_html.unwrap();
        assert!(preview.contains("<button>…</button>"));
        assert!(preview.contains("Static preview"));
    }
}
