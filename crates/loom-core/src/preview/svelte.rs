//! Static fallback for Svelte components.
//!
//! Svelte has no practical in-browser runtime, so the markup is reduced to inert HTML:
//! logic blocks vanish, interpolations become an ellipsis and directives are dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::blocks;
use super::document::static_preview;

/// Placeholder standing in for every interpolated expression.
pub const PLACEHOLDER: &str = "…";

static LOGIC_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*[#:/]\s*(?:if|else|each|await|then|catch|key|snippet)\b[^{}]*\}")
        .expect("logic block regex is valid")
});

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?:on|bind|class|style|use|transition|in|out|animate|let):[\w|.-]+(?:\s*=\s*(?:\{[^{}]*\}|"[^"]*"|'[^']*'))?"#)
        .expect("directive regex is valid")
});

static ATTRIBUTE_EXPR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=\s*\{[^{}]*\}").expect("attribute expression regex is valid")
});

static SHORTHAND_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<[A-Za-z][^<>]*?)\s\{[A-Za-z_$][\w$]*\}").expect("shorthand attribute regex is valid")
});

static INTERPOLATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("interpolation regex is valid"));

/// Reduce Svelte markup to inert HTML.
///
/// ```rust
/// use loom_core::preview::svelte::strip_to_static;
///
/// let html = strip_to_static("<script>let n = 1;</script>{#if n}<p>{n}</p>{/if}");
/// assert_eq!(html, "<p>…</p>");
/// ```
#[must_use]
pub fn strip_to_static(source: &str) -> String {
    let markup = blocks::strip_script_and_style(source);
    let markup = LOGIC_BLOCK_RE.replace_all(&markup, "");
    let markup = DIRECTIVE_RE.replace_all(&markup, "");
    let markup = ATTRIBUTE_EXPR_RE.replace_all(&markup, format!("=\"{PLACEHOLDER}\"").as_str());
    let mut markup = markup.into_owned();
    // Repeated until no tag still carries a `{name}` shorthand attribute.
    while SHORTHAND_ATTR_RE.is_match(&markup) {
        markup = SHORTHAND_ATTR_RE.replace_all(&markup, "$1").into_owned();
    }
    INTERPOLATION_RE
        .replace_all(&markup, PLACEHOLDER)
        .trim()
        .to_string()
}

/// Build the static preview document for a Svelte component.
#[must_use]
pub fn render(source: &str, title: &str) -> String {
    let styles = blocks::styles(source)
        .iter()
        .map(|style| format!("<style>{}</style>", style.body))
        .collect::<Vec<_>>()
        .join("\n");
    let markup = strip_to_static(source);
    if styles.is_empty() {
        static_preview(title, &markup)
    } else {
        static_preview(title, &format!("{styles}\n{markup}"))
    }
}
