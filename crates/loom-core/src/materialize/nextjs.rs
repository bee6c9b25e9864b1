use super::component::{component_module, with_client_boundary};
use super::scaffold;
use super::{Materializer, assemble};
use crate::preview::PreviewCompiler;
use crate::types::{GenerationResult, GeneratorConfig, TechStack};

const ENTRY: &str = "app/page.tsx";

const NEXT_CONFIG: &str = r"/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
};

module.exports = nextConfig;
";

const TAILWIND_CONFIG: &str = r"import type { Config } from 'tailwindcss';

const config: Config = {
  content: [
    './app/**/*.{js,ts,jsx,tsx,mdx}',
    './components/**/*.{js,ts,jsx,tsx,mdx}',
  ],
  theme: {
    extend: {},
  },
  plugins: [],
};

export default config;
";

// No `"type": "module"` in a Next.js manifest, so this one stays CommonJS.
const POSTCSS_CONFIG: &str = r"module.exports = {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
};
";

const NEXT_ENV: &str = r#"/// <reference types="next" />
/// <reference types="next/image-types/global" />

// NOTE: This file should not be edited
// see https://nextjs.org/docs/app/building-your-application/configuring/typescript for more information.
"#;

/// Next.js app router.
#[derive(Debug, Default, Clone, Copy)]
pub struct NextjsMaterializer;

impl Materializer for NextjsMaterializer {
    fn stack(&self) -> TechStack {
        TechStack::Nextjs
    }

    fn materialize(&self, raw: &str, config: &GeneratorConfig) -> GenerationResult {
        let title = config.page_title();
        let (page, shape) = component_module(raw, "Page");
        tracing::trace!(?shape, "normalized Next.js page component");

        let files = vec![
            (ENTRY, with_client_boundary(page)),
            ("app/layout.tsx", layout(&title)),
            ("app/globals.css", scaffold::global_css()),
            ("package.json", scaffold::package_json(TechStack::Nextjs, &config.project_name())),
            ("next.config.js", NEXT_CONFIG.to_string()),
            ("tailwind.config.ts", TAILWIND_CONFIG.to_string()),
            ("postcss.config.js", POSTCSS_CONFIG.to_string()),
            ("tsconfig.json", scaffold::tsconfig(TechStack::Nextjs)),
            ("next-env.d.ts", NEXT_ENV.to_string()),
        ];
        let mut result = assemble(TechStack::Nextjs, files, ENTRY, None);
        result.preview_html =
            Some(PreviewCompiler::new().with_title(title).compile(&result.files, TechStack::Nextjs));
        result
    }
}

/// Root layout with the page title as metadata.
fn layout(title: &str) -> String {
    let title = serde_json::to_string(title).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r"import type {{ Metadata }} from 'next';
import './globals.css';

export const metadata: Metadata = {{
  title: {title},
}};

export default function RootLayout({{ children }}: {{ children: React.ReactNode }}) {{
  return (
    <html lang='en'>
      <body>{{children}}</body>
    </html>
  );
}}
"
    )
}
