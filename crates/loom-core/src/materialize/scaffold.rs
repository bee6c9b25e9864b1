//! Fixed project scaffolding shared by the multi-file materializers.
//!
//! Every template here is a constant parameterized only by the project name or page
//! title, so identical configs always produce byte-identical scaffolds.

use serde_json::{Map, Value, json};

use crate::types::TechStack;

/// Tailwind layer directives placed at the top of every global stylesheet.
pub(crate) const TAILWIND_DIRECTIVES: &str = "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n";

/// Shared `postcss.config.js`.
pub(crate) const POSTCSS_CONFIG: &str = "export default {\n  plugins: {\n    tailwindcss: {},\n    autoprefixer: {},\n  },\n};\n";

const TAILWIND_VERSION: &str = "^3.4.14";
const POSTCSS_VERSION: &str = "^8.4.47";
const AUTOPREFIXER_VERSION: &str = "^10.4.20";
const TYPESCRIPT_VERSION: &str = "^5.6.3";
const VITE_VERSION: &str = "^5.4.10";
const REACT_VERSION: &str = "^18.3.1";

/// Global stylesheet body: directives plus a small base layer.
pub(crate) fn global_css() -> String {
    format!(
        "{TAILWIND_DIRECTIVES}\n:root {{\n  color-scheme: light;\n}}\n\nbody {{\n  margin: 0;\n  min-height: 100vh;\n  -webkit-font-smoothing: antialiased;\n}}\n"
    )
}

/// `package.json` with pinned versions for a stack.
///
/// Keys are emitted in sorted order, which keeps the manifest stable across runs.
pub(crate) fn package_json(stack: TechStack, project_name: &str) -> String {
    let (scripts, dependencies, dev_dependencies) = match stack {
        TechStack::Html => (json!({}), json!({}), json!({})),
        TechStack::React => (
            json!({
                "dev": "vite",
                "build": "tsc && vite build",
                "preview": "vite preview",
            }),
            json!({
                "react": REACT_VERSION,
                "react-dom": REACT_VERSION,
            }),
            json!({
                "@types/react": "^18.3.12",
                "@types/react-dom": "^18.3.1",
                "@vitejs/plugin-react": "^4.3.3",
                "autoprefixer": AUTOPREFIXER_VERSION,
                "postcss": POSTCSS_VERSION,
                "tailwindcss": TAILWIND_VERSION,
                "typescript": TYPESCRIPT_VERSION,
                "vite": VITE_VERSION,
            }),
        ),
        TechStack::Nextjs => (
            json!({
                "dev": "next dev",
                "build": "next build",
                "start": "next start",
                "lint": "next lint",
            }),
            json!({
                "next": "14.2.15",
                "react": REACT_VERSION,
                "react-dom": REACT_VERSION,
            }),
            json!({
                "@types/node": "^20.16.11",
                "@types/react": "^18.3.12",
                "@types/react-dom": "^18.3.1",
                "autoprefixer": AUTOPREFIXER_VERSION,
                "postcss": POSTCSS_VERSION,
                "tailwindcss": TAILWIND_VERSION,
                "typescript": TYPESCRIPT_VERSION,
            }),
        ),
        TechStack::Vue => (
            json!({
                "dev": "vite",
                "build": "vue-tsc -b && vite build",
                "preview": "vite preview",
            }),
            json!({ "vue": "^3.5.12" }),
            json!({
                "@vitejs/plugin-vue": "^5.1.4",
                "autoprefixer": AUTOPREFIXER_VERSION,
                "postcss": POSTCSS_VERSION,
                "tailwindcss": TAILWIND_VERSION,
                "typescript": TYPESCRIPT_VERSION,
                "vite": VITE_VERSION,
                "vue-tsc": "^2.1.6",
            }),
        ),
        TechStack::Svelte => (
            json!({
                "dev": "vite",
                "build": "vite build",
                "preview": "vite preview",
                "check": "svelte-check --tsconfig ./tsconfig.json",
            }),
            json!({}),
            json!({
                "@sveltejs/vite-plugin-svelte": "^3.1.2",
                "@tsconfig/svelte": "^5.0.4",
                "autoprefixer": AUTOPREFIXER_VERSION,
                "postcss": POSTCSS_VERSION,
                "svelte": "^4.2.19",
                "svelte-check": "^4.0.5",
                "tailwindcss": TAILWIND_VERSION,
                "tslib": "^2.8.0",
                "typescript": TYPESCRIPT_VERSION,
                "vite": VITE_VERSION,
            }),
        ),
    };

    let mut manifest = Map::new();
    manifest.insert("name".into(), Value::String(project_name.to_string()));
    manifest.insert("private".into(), Value::Bool(true));
    manifest.insert("version".into(), Value::String("0.1.0".into()));
    if stack != TechStack::Nextjs {
        manifest.insert("type".into(), Value::String("module".into()));
    }
    manifest.insert("scripts".into(), scripts);
    if dependencies.as_object().is_some_and(|deps| !deps.is_empty()) {
        manifest.insert("dependencies".into(), dependencies);
    }
    manifest.insert("devDependencies".into(), dev_dependencies);

    let mut rendered = serde_json::to_string_pretty(&Value::Object(manifest))
        .unwrap_or_else(|_| "{}".to_string());
    rendered.push('\n');
    rendered
}

/// Vite `index.html` host page mounting `#app`/`#root` from `entry`.
pub(crate) fn vite_index_html(title: &str, mount_id: &str, entry: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
  </head>
  <body>
    <div id="{mount_id}"></div>
    <script type="module" src="{entry}"></script>
  </body>
</html>
"#,
        title = escape_html(title),
    )
}

/// `vite.config.ts` for a stack that builds with Vite.
pub(crate) fn vite_config(stack: TechStack) -> String {
    let (import, plugin) = match stack {
        TechStack::Vue => ("import vue from '@vitejs/plugin-vue';", "vue()"),
        TechStack::Svelte => (
            "import { svelte } from '@sveltejs/vite-plugin-svelte';",
            "svelte()",
        ),
        _ => ("import react from '@vitejs/plugin-react';", "react()"),
    };
    format!(
        "import {{ defineConfig }} from 'vite';\n{import}\n\nexport default defineConfig({{\n  plugins: [{plugin}],\n}});\n"
    )
}

/// `tailwind.config.js` scanning the given content globs.
pub(crate) fn tailwind_config(content: &[&str]) -> String {
    let globs = content
        .iter()
        .map(|glob| format!("    '{glob}',"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "/** @type {{import('tailwindcss').Config}} */\nexport default {{\n  content: [\n{globs}\n  ],\n  theme: {{\n    extend: {{}},\n  }},\n  plugins: [],\n}};\n"
    )
}

/// `tsconfig.json` tuned for each stack.
pub(crate) fn tsconfig(stack: TechStack) -> String {
    let value = match stack {
        TechStack::Nextjs => json!({
            "compilerOptions": {
                "target": "ES2017",
                "lib": ["dom", "dom.iterable", "esnext"],
                "allowJs": true,
                "skipLibCheck": true,
                "strict": true,
                "noEmit": true,
                "esModuleInterop": true,
                "module": "esnext",
                "moduleResolution": "bundler",
                "resolveJsonModule": true,
                "isolatedModules": true,
                "jsx": "preserve",
                "incremental": true,
                "plugins": [{ "name": "next" }],
                "paths": { "@/*": ["./*"] }
            },
            "include": ["next-env.d.ts", "**/*.ts", "**/*.tsx", ".next/types/**/*.ts"],
            "exclude": ["node_modules"]
        }),
        TechStack::Svelte => json!({
            "extends": "@tsconfig/svelte/tsconfig.json",
            "compilerOptions": {
                "target": "ESNext",
                "useDefineForClassFields": true,
                "module": "ESNext",
                "resolveJsonModule": true,
                "allowJs": true,
                "checkJs": true,
                "isolatedModules": true,
                "moduleDetection": "force"
            },
            "include": ["src/**/*.ts", "src/**/*.js", "src/**/*.svelte"]
        }),
        TechStack::Vue => json!({
            "compilerOptions": {
                "target": "ES2020",
                "useDefineForClassFields": true,
                "module": "ESNext",
                "lib": ["ES2020", "DOM", "DOM.Iterable"],
                "skipLibCheck": true,
                "moduleResolution": "bundler",
                "isolatedModules": true,
                "noEmit": true,
                "jsx": "preserve",
                "strict": true
            },
            "include": ["src/**/*.ts", "src/**/*.tsx", "src/**/*.vue"]
        }),
        TechStack::React | TechStack::Html => json!({
            "compilerOptions": {
                "target": "ES2020",
                "useDefineForClassFields": true,
                "lib": ["ES2020", "DOM", "DOM.Iterable"],
                "module": "ESNext",
                "skipLibCheck": true,
                "moduleResolution": "bundler",
                "isolatedModules": true,
                "noEmit": true,
                "jsx": "react-jsx",
                "strict": true
            },
            "include": ["src"]
        }),
    };
    let mut rendered = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    rendered.push('\n');
    rendered
}

/// Minimal HTML escaping for text placed in titles and attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Indent every non-empty line of `text` by `width` spaces.
pub(crate) fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_package_json_is_valid_and_named() {
        for stack in TechStack::ALL {
            let manifest = package_json(stack, "landing-page");
            let parsed: Value = serde_json::from_str(&manifest).unwrap();
            assert_eq!(parsed["name"], "landing-page");
            assert_eq!(parsed["private"], true);
        }
    }

    #[test]
    fn test_package_json_pins_framework_versions() {
        let react: Value = serde_json::from_str(&package_json(TechStack::React, "x")).unwrap();
        assert_eq!(react["dependencies"]["react"], REACT_VERSION);
        assert_eq!(react["devDependencies"]["vite"], VITE_VERSION);

        let next: Value = serde_json::from_str(&package_json(TechStack::Nextjs, "x")).unwrap();
        assert_eq!(next["dependencies"]["next"], "14.2.15");
        assert!(next.get("type").is_none());

        let svelte: Value = serde_json::from_str(&package_json(TechStack::Svelte, "x")).unwrap();
        assert!(svelte.get("dependencies").is_none());
        assert_eq!(svelte["devDependencies"]["svelte"], "^4.2.19");
    }

    #[test]
    fn test_vite_config_plugin_per_stack() {
        assert!(vite_config(TechStack::React).contains("react()"));
        assert!(vite_config(TechStack::Vue).contains("vue()"));
        assert!(vite_config(TechStack::Svelte).contains("svelte()"));
    }

    #[test]
    fn test_tsconfig_is_valid_json() {
        for stack in TechStack::ALL {
            let parsed: Value = serde_json::from_str(&tsconfig(stack)).unwrap();
            assert!(parsed.get("include").is_some());
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("<div>\n\n  <p/>\n</div>", 4), "    <div>\n\n      <p/>\n    </div>");
    }
}
