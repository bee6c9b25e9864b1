//! Delimiter-bounded extraction of single-file-component blocks.
//!
//! Template extraction is greedy (outermost `<template>` pair) so nested
//! `<template v-if>` elements survive. Script and style extraction stop at the first
//! closing delimiter; a literal `</script>` inside a script block ends it early.

use std::sync::LazyLock;

use regex::Regex;

static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<template(?:\s[^>]*)?>(.*)</template\s*>").expect("template regex is valid")
});

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script(\s[^>]*)?>(.*?)</script\s*>").expect("script regex is valid")
});

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style(\s[^>]*)?>(.*?)</style\s*>").expect("style regex is valid")
});

static LANG_TS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\blang\s*=\s*["']?(?:ts|typescript)\b"#).expect("lang regex is valid")
});

/// A `<script>` block with its opening-tag attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    /// Opening-tag attributes, including the leading whitespace.
    pub attrs: &'a str,
    /// Everything between the opening and closing tags.
    pub body: &'a str,
}

impl ScriptBlock<'_> {
    /// `<script setup>`
    #[must_use]
    pub fn is_setup(&self) -> bool {
        self.attrs
            .split_whitespace()
            .any(|attr| attr.eq_ignore_ascii_case("setup"))
    }

    /// `lang="ts"`
    #[must_use]
    pub fn is_typescript(&self) -> bool {
        LANG_TS_RE.is_match(self.attrs)
    }
}

/// Content of the outermost `<template>` block.
#[must_use]
pub fn template(source: &str) -> Option<&str> {
    TEMPLATE_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

/// Every `<script>` block in document order.
#[must_use]
pub fn scripts(source: &str) -> Vec<ScriptBlock<'_>> {
    SCRIPT_RE
        .captures_iter(source)
        .map(|caps| ScriptBlock {
            attrs: caps.get(1).map_or("", |m| m.as_str()),
            body: caps.get(2).map_or("", |m| m.as_str()),
        })
        .collect()
}

/// A `<style>` block with its opening-tag attributes (`scoped`, `lang`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock<'a> {
    /// Opening-tag attributes, including the leading whitespace.
    pub attrs: &'a str,
    /// The stylesheet text.
    pub body: &'a str,
}

/// Every `<style>` block in document order.
#[must_use]
pub fn styles(source: &str) -> Vec<StyleBlock<'_>> {
    STYLE_RE
        .captures_iter(source)
        .map(|caps| StyleBlock {
            attrs: caps.get(1).map_or("", |m| m.as_str()),
            body: caps.get(2).map_or("", |m| m.as_str()),
        })
        .collect()
}

/// `source` with its script and style blocks removed.
#[must_use]
pub fn strip_script_and_style(source: &str) -> String {
    let without_scripts = SCRIPT_RE.replace_all(source, "");
    STYLE_RE.replace_all(&without_scripts, "").into_owned()
}
