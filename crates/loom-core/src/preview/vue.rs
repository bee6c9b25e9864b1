//! Vue single-file components mounted with the global Vue build.
//!
//! The template is compiled at runtime by Vue itself. A `<script setup>` body becomes
//! the component's `setup()` function returning every top-level binding; an options
//! object (`export default { ... }`) is used as the component definition directly.

use std::sync::LazyLock;

use regex::Regex;

use super::blocks::{self, ScriptBlock};
use super::document::{BABEL_CDN, VUE_CDN, js_string_literal, runtime_shell};
use crate::analysis;

/// Composition API helpers exposed unqualified to setup code.
pub const VUE_GLOBALS: [&str; 11] = [
    "ref",
    "reactive",
    "computed",
    "watch",
    "watchEffect",
    "onMounted",
    "onUnmounted",
    "nextTick",
    "toRefs",
    "defineComponent",
    "h",
];

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s(?:[^;'"]*?\sfrom\s*)?['"][^'"\n]+['"][ \t]*;?[ \t]*\r?\n?"#)
        .expect("import regex is valid")
});

static BINDING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)(?:export\s+)?(?:(?:const|let|var)\s+([A-Za-z_$][\w$]*)|(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)|class\s+([A-Za-z_$][\w$]*))")
        .expect("binding regex is valid")
});

static DESTRUCTURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)(?:const|let|var)\s*[\{\[]([^\}\]]*)[\}\]]\s*=")
        .expect("destructure regex is valid")
});

static OPTIONS_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+").expect("options export regex is valid")
});

/// Build the preview document for a Vue component (or a bare template fragment).
#[must_use]
pub fn render(source: &str, title: &str) -> String {
    let template = blocks::template(source).map_or_else(
        || blocks::strip_script_and_style(source).trim().to_string(),
        |body| body.trim().to_string(),
    );
    let scripts = blocks::scripts(source);
    let script = scripts
        .iter()
        .find(|block| block.is_setup())
        .or_else(|| scripts.first());

    let (factory, typescript) = script.map_or_else(
        || ("return null;".to_string(), false),
        |block| (component_factory(block), block.is_typescript()),
    );

    let styles = blocks::styles(source)
        .iter()
        .map(|style| format!("<style>{}</style>", style.body.replace("</", "<\\/")))
        .collect::<Vec<_>>()
        .join("\n");
    let body = if styles.is_empty() {
        r#"<div id="app"></div>"#.to_string()
    } else {
        format!("{styles}\n<div id=\"app\"></div>")
    };

    let transpile = if typescript {
        "    factorySource = Babel.transform(factorySource, { filename: 'App.ts', parserOpts: { allowReturnOutsideFunction: true }, presets: [['typescript', { allExtensions: true }]] }).code;\n"
    } else {
        ""
    };

    let mount = format!(
        r"(function () {{
  var template = {template};
  var factorySource = {factory};
  try {{
{transpile}    var definition = new Function('Vue', factorySource)(Vue);
    var component;
    if (typeof definition === 'function') {{
      component = {{ template: template, setup: definition }};
    }} else {{
      component = Object.assign({{}}, definition || {{}});
      if (!component.template && !component.render) {{
        component.template = template;
      }}
    }}
    var app = Vue.createApp(component);
    app.config.errorHandler = function (err) {{ window.__loomShowError(err); }};
    app.mount('#app');
  }} catch (err) {{
    window.__loomShowError(err);
  }}
}})();",
        template = js_string_literal(&template),
        factory = js_string_literal(&factory),
    );

    let runtimes: &[&str] = if typescript {
        &[VUE_CDN, BABEL_CDN]
    } else {
        &[VUE_CDN]
    };
    runtime_shell(title, runtimes, &body, &mount)
}

/// Script that, run with the global `Vue` in scope, returns either a setup function or
/// an options object.
fn component_factory(block: &ScriptBlock<'_>) -> String {
    let code = IMPORT_RE.replace_all(block.body, "");
    let code = code.trim();
    let prelude = globals_prelude(code);

    if !block.is_setup() && OPTIONS_EXPORT_RE.is_match(code) {
        let options = OPTIONS_EXPORT_RE.replace(code, "var __loomOptions = ");
        return format!("{prelude}{options}\nreturn __loomOptions;");
    }

    let shims = macro_shims(code);
    let bindings = top_level_bindings(code);
    format!(
        "{prelude}return function __loomSetup(__props, __ctx) {{\n{shims}{code}\nreturn {{ {} }};\n}};",
        bindings.join(", ")
    )
}

fn globals_prelude(code: &str) -> String {
    let used: Vec<_> = VUE_GLOBALS
        .iter()
        .copied()
        .filter(|name| analysis::contains_identifier(code, name) && !analysis::declares(code, name))
        .collect();
    if used.is_empty() {
        String::new()
    } else {
        format!("var {{ {} }} = Vue;\n", used.join(", "))
    }
}

/// Stand-ins for the compiler macros `<script setup>` may call.
fn macro_shims(code: &str) -> String {
    [
        ("defineProps", "var defineProps = function () { return __props; };\n"),
        ("defineEmits", "var defineEmits = function () { return __ctx.emit; };\n"),
        (
            "withDefaults",
            "var withDefaults = function (props, defaults) { return Object.assign({}, defaults, props); };\n",
        ),
        ("defineExpose", "var defineExpose = function () {};\n"),
    ]
    .iter()
    .filter(|(name, _)| analysis::contains_identifier(code, name))
    .map(|(_, shim)| *shim)
    .collect()
}

/// Names declared at the outermost indentation level of a setup body.
#[must_use]
pub fn top_level_bindings(code: &str) -> Vec<String> {
    let base_indent = code
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut names: Vec<(usize, String)> = Vec::new();
    for caps in BINDING_RE.captures_iter(code) {
        if caps[1].len() != base_indent {
            continue;
        }
        if let Some(name) = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4)) {
            names.push((name.start(), name.as_str().to_string()));
        }
    }
    for caps in DESTRUCTURE_RE.captures_iter(code) {
        if caps[1].len() != base_indent {
            continue;
        }
        let start = caps.get(2).map_or(0, |m| m.start());
        for part in caps[2].split(',') {
            let target = part.rsplit(':').next().unwrap_or(part);
            let name = target.split('=').next().unwrap_or(target).trim();
            let name = name.trim_start_matches("...");
            if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
                names.push((start, name.to_string()));
            }
        }
    }

    names.sort_by_key(|(pos, _)| *pos);
    let mut seen = Vec::new();
    for (_, name) in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}
