//! Ordered "main file" selection rules.
//!
//! Each family has a fixed priority list evaluated first-match-wins. Rules are plain
//! values so the table can be inspected, tested and extended without touching the
//! compiler.

use crate::types::{GeneratedFile, RenderFamily, TechStack};

/// One entry of the main-file priority table.
#[derive(Clone, Copy)]
pub struct MainFileRule {
    /// Short description used in logs and tests.
    pub name: &'static str,
    /// Predicate over a file path.
    pub matches: fn(&str) -> bool,
}

impl std::fmt::Debug for MainFileRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainFileRule").field("name", &self.name).finish()
    }
}

const STATIC_RULES: &[MainFileRule] = &[
    MainFileRule {
        name: "index.html",
        matches: |path| path == "index.html",
    },
    MainFileRule {
        name: "any .html",
        matches: |path| has_ext(path, &["html", "htm"]),
    },
];

const COMPONENT_RULES: &[MainFileRule] = &[
    MainFileRule {
        name: "src/App.tsx",
        matches: |path| path == "src/App.tsx",
    },
    MainFileRule {
        name: "src/App.jsx",
        matches: |path| path == "src/App.jsx",
    },
    MainFileRule {
        name: "app/page.tsx",
        matches: |path| path == "app/page.tsx",
    },
    MainFileRule {
        name: "app/page.jsx",
        matches: |path| path == "app/page.jsx",
    },
    MainFileRule {
        name: "pages/index.tsx",
        matches: |path| path == "pages/index.tsx",
    },
    MainFileRule {
        name: "pages/index.jsx",
        matches: |path| path == "pages/index.jsx",
    },
    MainFileRule {
        name: "*App.tsx / *App.jsx",
        matches: |path| file_name(path) == "App.tsx" || file_name(path) == "App.jsx",
    },
    MainFileRule {
        name: "*page.tsx / *page.jsx",
        matches: |path| file_name(path) == "page.tsx" || file_name(path) == "page.jsx",
    },
    MainFileRule {
        name: "any .tsx / .jsx",
        matches: |path| has_ext(path, &["tsx", "jsx"]),
    },
];

const VUE_RULES: &[MainFileRule] = &[
    MainFileRule {
        name: "src/App.vue",
        matches: |path| path == "src/App.vue",
    },
    MainFileRule {
        name: "*App.vue",
        matches: |path| file_name(path) == "App.vue",
    },
    MainFileRule {
        name: "any .vue",
        matches: |path| has_ext(path, &["vue"]),
    },
];

const SVELTE_RULES: &[MainFileRule] = &[
    MainFileRule {
        name: "src/App.svelte",
        matches: |path| path == "src/App.svelte",
    },
    MainFileRule {
        name: "*App.svelte",
        matches: |path| file_name(path) == "App.svelte",
    },
    MainFileRule {
        name: "src/routes/+page.svelte",
        matches: |path| path == "src/routes/+page.svelte",
    },
    MainFileRule {
        name: "any .svelte",
        matches: |path| has_ext(path, &["svelte"]),
    },
];

/// The priority table for a stack.
#[must_use]
pub fn main_file_rules(stack: TechStack) -> &'static [MainFileRule] {
    match stack.family() {
        RenderFamily::Static => STATIC_RULES,
        RenderFamily::Component => COMPONENT_RULES,
        RenderFamily::SingleFileComponent if stack == TechStack::Vue => VUE_RULES,
        RenderFamily::SingleFileComponent => SVELTE_RULES,
    }
}

/// Select the main file: the first rule (in priority order) that any file satisfies
/// wins, and within a rule the first file in list order is taken.
#[must_use]
pub fn find_main_file(files: &[GeneratedFile], stack: TechStack) -> Option<&GeneratedFile> {
    main_file_rules(stack).iter().find_map(|rule| {
        let found = files.iter().find(|file| (rule.matches)(&file.path));
        if let Some(file) = found {
            tracing::trace!(rule = rule.name, path = %file.path, "main file selected");
        }
        found
    })
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn has_ext(path: &str, exts: &[&str]) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| exts.contains(&ext))
}
