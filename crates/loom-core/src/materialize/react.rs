use super::component::component_module;
use super::scaffold::{self, POSTCSS_CONFIG};
use super::{Materializer, assemble};
use crate::preview::PreviewCompiler;
use crate::types::{GenerationResult, GeneratorConfig, TechStack};

const ENTRY: &str = "src/App.tsx";

const MAIN_TSX: &str = r"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './index.css';

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
);
";

/// React on Vite.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReactMaterializer;

impl Materializer for ReactMaterializer {
    fn stack(&self) -> TechStack {
        TechStack::React
    }

    fn materialize(&self, raw: &str, config: &GeneratorConfig) -> GenerationResult {
        let title = config.page_title();
        let (app, shape) = component_module(raw, "App");
        tracing::trace!(?shape, "normalized React entry component");

        let files = vec![
            ("index.html", scaffold::vite_index_html(&title, "root", "/src/main.tsx")),
            ("src/main.tsx", MAIN_TSX.to_string()),
            (ENTRY, app),
            ("src/index.css", scaffold::global_css()),
            ("package.json", scaffold::package_json(TechStack::React, &config.project_name())),
            ("vite.config.ts", scaffold::vite_config(TechStack::React)),
            (
                "tailwind.config.js",
                scaffold::tailwind_config(&["./index.html", "./src/**/*.{js,ts,jsx,tsx}"]),
            ),
            ("postcss.config.js", POSTCSS_CONFIG.to_string()),
            ("tsconfig.json", scaffold::tsconfig(TechStack::React)),
        ];
        let mut result = assemble(TechStack::React, files, ENTRY, None);
        result.preview_html =
            Some(PreviewCompiler::new().with_title(title).compile(&result.files, TechStack::React));
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Language;

    const PATHS: [&str; 9] = [
        "index.html",
        "src/main.tsx",
        "src/App.tsx",
        "src/index.css",
        "package.json",
        "vite.config.ts",
        "tailwind.config.js",
        "postcss.config.js",
        "tsconfig.json",
    ];

    #[test]
    fn test_emits_vite_scaffold() {
        let config = GeneratorConfig::default().with_page_type("portfolio");
        let result = ReactMaterializer.materialize("<h1>Hi</h1>", &config);

        let paths: Vec<_> = result.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, PATHS);
        assert_eq!(result.preview_entry, "src/App.tsx");
        assert_eq!(result.entry_file().unwrap().language, Language::Tsx);
        assert!(result.file("package.json").unwrap().content.contains("\"name\": \"portfolio\""));
        assert!(result.file("index.html").unwrap().content.contains("<title>Portfolio</title>"));
        assert!(result.file("src/index.css").unwrap().content.starts_with("@tailwind base;"));
    }

    #[test]
    fn test_wraps_fragment_in_app() {
        let result = ReactMaterializer.materialize("<h1>Hi</h1>", &GeneratorConfig::default());
        let app = &result.entry_file().unwrap().content;
        assert!(app.contains("export default function App() {"));
        assert!(app.contains("<h1>Hi</h1>"));
        assert!(!app.contains("use client"));
    }

    #[test]
    fn test_preview_mounts_entry() {
        let raw = "export default function Dashboard() { return <p>ok</p>; }";
        let result = ReactMaterializer.materialize(raw, &GeneratorConfig::default());
        assert_eq!(result.entry_file().unwrap().content, raw);
        let preview = result.preview_html.unwrap();
        assert!(preview.contains(r#"var componentName = "Dashboard";"#));
    }
}
