//! Pattern-based inspection of generated UI source.
//!
//! Generated code never goes through a real parser: every question the materializers
//! and the preview compiler ask ("is there a default export?", "does this need client
//! interactivity?") is answered with the regexes below. Matches are best-effort by
//! nature; callers always have a wrap-as-is fallback for input they do not recognize.

use std::sync::LazyLock;

use regex::Regex;

/// Substrings that mark a component as needing client-side interactivity.
pub const CLIENT_MARKERS: [&str; 16] = [
    "useState",
    "useEffect",
    "useRef",
    "useReducer",
    "useCallback",
    "useMemo",
    "useContext",
    "onClick",
    "onChange",
    "onSubmit",
    "onInput",
    "onKeyDown",
    "onMouseEnter",
    "onMouseLeave",
    "onFocus",
    "onBlur",
];

/// React hooks and helpers the preview runtime exposes unqualified.
pub const REACT_GLOBALS: [&str; 10] = [
    "useState",
    "useEffect",
    "useRef",
    "useReducer",
    "useCallback",
    "useMemo",
    "useContext",
    "useLayoutEffect",
    "createContext",
    "Fragment",
];

static DOCTYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*<!doctype\s").expect("doctype regex is valid"));

static DEFAULT_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s+default\s+(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)?\s*\(")
        .expect("default function regex is valid")
});

static DEFAULT_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s+default\s+class\s+([A-Za-z_$][\w$]*)")
        .expect("default class regex is valid")
});

static DEFAULT_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*export\s+default\s+([A-Za-z_$][\w$]*)\s*;?\s*$")
        .expect("default identifier regex is valid")
});

static DEFAULT_ANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s+default\s").expect("default regex is valid"));

static COMPONENT_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:export\s+)?(?:function\s+([A-Z][\w$]*)\s*\(|(?:const|let|var)\s+([A-Z][\w$]*)\s*(?::[^=]+)?=\s*(?:\(|function\b|async\b|[A-Za-z_$][\w$]*\s*=>|React\.memo|memo\(|forwardRef|React\.forwardRef))",
    )
    .expect("component declaration regex is valid")
});

static CLIENT_DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?://[^\n]*\n\s*|/\*(?s:.*?)\*/\s*)*['"]use client['"]"#)
        .expect("client directive regex is valid")
});

static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_+.-]*[^\S\n]*\n(.*?)\n?```").expect("code fence regex is valid")
});

static BINDING_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var|function|class)\s+([A-Za-z_$][\w$]*)")
        .expect("binding declaration regex is valid")
});

static IMPORT_CLAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\b([^;]*)").expect("import clause regex is valid"));

/// Name given to anonymous default exports.
pub const ANONYMOUS_DEFAULT: &str = "DefaultExport";

/// Whether `source` starts with a document type declaration.
#[must_use]
pub fn has_doctype(source: &str) -> bool {
    DOCTYPE_RE.is_match(source)
}

/// Whether `source` declares a default-exported component.
#[must_use]
pub fn has_default_export(source: &str) -> bool {
    DEFAULT_ANY_RE.is_match(source)
}

/// Whether `source` uses any of the [`CLIENT_MARKERS`].
#[must_use]
pub fn needs_client_boundary(source: &str) -> bool {
    CLIENT_MARKERS.iter().any(|marker| source.contains(marker))
}

/// Whether `source` already opens with a `'use client'` directive.
#[must_use]
pub fn has_client_directive(source: &str) -> bool {
    CLIENT_DIRECTIVE_RE.is_match(source)
}

/// Identifier of the component a module exports, if one can be recognized.
///
/// Default exports win; anonymous ones are reported as [`ANONYMOUS_DEFAULT`]. Without
/// a default export, the first capitalized function or arrow component is used.
///
/// ```rust
/// use loom_core::analysis::detect_component_name;
///
/// assert_eq!(detect_component_name("export default function Hero() {}").as_deref(), Some("Hero"));
/// assert_eq!(detect_component_name("const Card = () => <div/>;").as_deref(), Some("Card"));
/// assert_eq!(detect_component_name("<div>plain markup</div>"), None);
/// ```
#[must_use]
pub fn detect_component_name(source: &str) -> Option<String> {
    if let Some(caps) = DEFAULT_FUNCTION_RE.captures(source) {
        return Some(
            caps.get(1)
                .map_or(ANONYMOUS_DEFAULT, |name| name.as_str())
                .to_string(),
        );
    }
    if let Some(caps) = DEFAULT_CLASS_RE.captures(source) {
        return Some(caps[1].to_string());
    }
    if let Some(caps) = DEFAULT_IDENT_RE.captures(source) {
        return Some(caps[1].to_string());
    }
    if has_default_export(source) {
        return Some(ANONYMOUS_DEFAULT.to_string());
    }
    COMPONENT_DECL_RE.captures(source).and_then(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|name| name.as_str().to_string())
    })
}

/// React globals referenced by `source` that it does not declare itself.
#[must_use]
pub fn undeclared_react_globals(source: &str) -> Vec<&'static str> {
    REACT_GLOBALS
        .iter()
        .copied()
        .filter(|name| contains_identifier(source, name) && !declares(source, name))
        .collect()
}

/// Whether `name` appears in `source` as a whole identifier.
#[must_use]
pub fn contains_identifier(source: &str, name: &str) -> bool {
    source.match_indices(name).any(|(idx, _)| {
        let before = source[..idx].chars().next_back();
        let after = source[idx + name.len()..].chars().next();
        !before.is_some_and(is_identifier_char) && !after.is_some_and(is_identifier_char)
    })
}

/// Whether `source` declares `name` with a binding keyword or imports it.
#[must_use]
pub fn declares(source: &str, name: &str) -> bool {
    BINDING_DECL_RE
        .captures_iter(source)
        .any(|caps| &caps[1] == name)
        || IMPORT_CLAUSE_RE
            .captures_iter(source)
            .any(|caps| contains_identifier(&caps[1], name))
}

/// Pull the code out of a model response.
///
/// A response wrapped in a single markdown code fence is unwrapped; the first fenced
/// block is taken when the response mixes prose and code. Anything else is returned
/// trimmed.
///
/// ```rust
/// use loom_core::analysis::extract_code;
///
/// assert_eq!(extract_code("```html\n<div>Hi</div>\n```"), "<div>Hi</div>");
/// assert_eq!(extract_code("  <div>Hi</div>\n"), "<div>Hi</div>");
/// ```
#[must_use]
pub fn extract_code(response: &str) -> String {
    CODE_FENCE_RE.captures(response).map_or_else(
        || response.trim().to_string(),
        |caps| caps[1].trim().to_string(),
    )
}

const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_doctype_ignores_leading_whitespace_and_case() {
        assert!(has_doctype("<!DOCTYPE html><html></html>"));
        assert!(has_doctype("\n  <!doctype html>\n<html>"));
        assert!(!has_doctype("<div><!DOCTYPE html></div>"));
        assert!(!has_doctype("<html></html>"));
    }

    #[test]
    fn test_default_export_forms() {
        assert!(has_default_export("export default function App() {}"));
        assert!(has_default_export("const A = () => null;\nexport default A;"));
        assert!(has_default_export("export default () => <div/>;"));
        assert!(!has_default_export("export function App() {}"));
        assert!(!has_default_export("<p>export default text</p>"));
    }

    #[test]
    fn test_detect_component_name_variants() {
        let cases = [
            ("export default function Landing() { return null; }", Some("Landing")),
            ("export default async function Page() {}", Some("Page")),
            ("export default function () { return null; }", Some(ANONYMOUS_DEFAULT)),
            ("export default class Widget extends React.Component {}", Some("Widget")),
            ("function Hero() {}\nexport default Hero;", Some("Hero")),
            ("export default memo(Card);", Some(ANONYMOUS_DEFAULT)),
            ("const Pricing: React.FC = () => null;", Some("Pricing")),
            ("function helper() {}\nfunction Navbar() {}", Some("Navbar")),
            ("<section>no component</section>", None),
        ];
        for (source, expected) in cases {
            assert_eq!(detect_component_name(source).as_deref(), expected, "{source}");
        }
    }

    #[test]
    fn test_client_markers() {
        assert!(needs_client_boundary("const [a, setA] = useState(0);"));
        assert!(needs_client_boundary("<button onClick={go}>Go</button>"));
        assert!(!needs_client_boundary("<div className=\"p-4\">static</div>"));
    }

    #[test]
    fn test_client_directive_detection() {
        assert!(has_client_directive("'use client';\nexport default function A() {}"));
        assert!(has_client_directive("\"use client\"\nfunction A() {}"));
        assert!(has_client_directive("// page\n'use client';"));
        assert!(!has_client_directive("import x from 'y';\n'use client';"));
    }

    #[test]
    fn test_undeclared_react_globals() {
        let source = "const [n, setN] = useState(0);\nuseEffect(() => {}, []);\nconst useMemo = 1;";
        assert_eq!(undeclared_react_globals(source), vec!["useState", "useEffect"]);
        assert!(undeclared_react_globals("useStateful()").is_empty());
        assert!(
            undeclared_react_globals("import { useState } from 'react';\nuseState(1);").is_empty()
        );
    }

    #[test]
    fn test_declares_bindings_and_imports() {
        assert!(declares("const useMemo = 1;", "useMemo"));
        assert!(declares("export function Fragment() {}", "Fragment"));
        assert!(declares("import React, {\n  useRef,\n} from 'react';", "useRef"));
        assert!(!declares("const useRefs = 1;", "useRef"));
        assert!(!declares("import { useRefs } from 'x';", "useRef"));
        assert!(!declares("useRef(null);", "useRef"));
    }

    #[test]
    fn test_extract_code_variants() {
        assert_eq!(
            extract_code("Here you go:\n```jsx\nexport default function A() {}\n```\nEnjoy!"),
            "export default function A() {}"
        );
        assert_eq!(extract_code("```\n<p>x</p>```"), "<p>x</p>");
        assert_eq!(extract_code("no fences"), "no fences");
    }
}
