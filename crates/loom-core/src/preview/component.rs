//! JSX component previews mounted by the React UMD runtime.
//!
//! The main file is cleaned down to a plain script: directives, imports and export
//! keywords go (the runtime is global and other project files cannot be resolved in
//! the sandbox), TypeScript and JSX are transpiled in the browser, and the detected
//! component is mounted inside an error boundary.

use std::sync::LazyLock;

use regex::Regex;

use super::document::{BABEL_CDN, REACT_CDN, REACT_DOM_CDN, js_string_literal, runtime_shell};
use crate::analysis::{self, ANONYMOUS_DEFAULT};
use crate::materialize::scaffold::indent;

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*['"]use (?:client|server|strict)['"];?[ \t]*\r?\n?"#)
        .expect("directive regex is valid")
});

static IMPORT_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s[^;'"]*?\sfrom\s*['"][^'"\n]+['"][ \t]*;?[ \t]*\r?\n?"#)
        .expect("import regex is valid")
});

static IMPORT_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import\s*['"][^'"\n]+['"][ \t]*;?[ \t]*\r?\n?"#)
        .expect("side-effect import regex is valid")
});

static EXPORT_DEFAULT_FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+default\s+((?:async\s+)?function\b\s*\*?\s*)(\()")
        .expect("anonymous default function regex is valid")
});

static EXPORT_DEFAULT_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+default\s+((?:async\s+)?function\b|class\b)")
        .expect("default declaration regex is valid")
});

static EXPORT_DEFAULT_IDENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*export\s+default\s+[A-Za-z_$][\w$]*[ \t]*;?[ \t]*\r?\n?")
        .expect("default identifier regex is valid")
});

static EXPORT_DEFAULT_EXPR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+default\s+").expect("default expression regex is valid")
});

static EXPORT_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*export\s*(?:type\s*)?\{[^}]*\}(?:\s*from\s*['"][^'"\n]+['"])?[ \t]*;?[ \t]*\r?\n?"#)
        .expect("export list regex is valid")
});

static EXPORT_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)export\s+((?:async\s+)?function\b|const\b|let\b|var\b|class\b|interface\b|type\b|enum\b|abstract\b)")
        .expect("export keyword regex is valid")
});

/// Strip what cannot run as a classic script: directives, imports and exports.
///
/// Anonymous default exports are bound to [`ANONYMOUS_DEFAULT`] so they can still be
/// mounted.
#[must_use]
pub fn clean_source(source: &str) -> String {
    let cleaned = DIRECTIVE_RE.replace_all(source, "");
    let cleaned = IMPORT_FROM_RE.replace_all(&cleaned, "");
    let cleaned = IMPORT_BARE_RE.replace_all(&cleaned, "");
    let cleaned = EXPORT_DEFAULT_FN_RE.replace_all(
        &cleaned,
        format!("${{1}}${{2}}{ANONYMOUS_DEFAULT}${{3}}").as_str(),
    );
    let cleaned = EXPORT_DEFAULT_DECL_RE.replace_all(&cleaned, "${1}${2}");
    let cleaned = EXPORT_DEFAULT_IDENT_RE.replace_all(&cleaned, "");
    let cleaned = EXPORT_DEFAULT_EXPR_RE.replace_all(
        &cleaned,
        format!("${{1}}const {ANONYMOUS_DEFAULT} = ").as_str(),
    );
    let cleaned = EXPORT_LIST_RE.replace_all(&cleaned, "");
    let cleaned = EXPORT_KEYWORD_RE.replace_all(&cleaned, "${1}${2}");
    cleaned.trim().to_string()
}

/// Wrap a bare JSX fragment in an `App` component.
#[must_use]
pub fn wrap_fragment(fragment: &str) -> String {
    format!(
        "function App() {{\n  return (\n    <>\n{}\n    </>\n  );\n}}",
        indent(fragment.trim(), 6)
    )
}

/// Build the preview document for a component module or a bare JSX fragment.
#[must_use]
pub fn render(source: &str, title: &str) -> String {
    let (module, component) = match analysis::detect_component_name(source) {
        Some(name) => (clean_source(source), name),
        None => (wrap_fragment(&clean_source(source)), "App".to_string()),
    };

    let prelude = prelude_for(&module);
    let program = if prelude.is_empty() {
        module
    } else {
        format!("{prelude}\n{module}")
    };

    let script = format!(
        r"(function () {{
  var source = {source};
  var componentName = {component};
  try {{
    var compiled = Babel.transform(source, {{
      filename: 'App.tsx',
      presets: [['typescript', {{ isTSX: true, allExtensions: true }}], 'react'],
    }}).code;
    var factory = new Function('React', 'ReactDOM', compiled + '\nreturn typeof ' + componentName + ' !== \'undefined\' ? ' + componentName + ' : null;');
    var Component = factory(React, ReactDOM);
    if (!Component) {{
      throw new Error('Component \'' + componentName + '\' was not found in the generated code');
    }}
    class LoomBoundary extends React.Component {{
      constructor(props) {{ super(props); this.state = {{ error: null }}; }}
      static getDerivedStateFromError(error) {{ return {{ error: error }}; }}
      componentDidCatch(error) {{ window.__loomShowError(error); }}
      render() {{ return this.state.error ? null : this.props.children; }}
    }}
    ReactDOM.createRoot(document.getElementById('root')).render(
      React.createElement(LoomBoundary, null, React.createElement(Component))
    );
  }} catch (err) {{
    window.__loomShowError(err);
  }}
}})();",
        source = js_string_literal(&program),
        component = js_string_literal(&component),
    );

    runtime_shell(
        title,
        &[REACT_CDN, REACT_DOM_CDN, BABEL_CDN],
        r#"<div id="root"></div>"#,
        &script,
    )
}

/// Declarations that make the stripped imports resolvable against the globals.
fn prelude_for(module: &str) -> String {
    let mut lines = Vec::new();
    let globals = analysis::undeclared_react_globals(module);
    if !globals.is_empty() {
        lines.push(format!("var {{ {} }} = React;", globals.join(", ")));
    }
    for (name, element) in [("Link", "a"), ("Image", "img")] {
        if module.contains(&format!("<{name}")) && !analysis::declares(module, name) {
            lines.push(format!(
                "var {name} = function (props) {{ return React.createElement('{element}', props); }};"
            ));
        }
    }
    lines.join("\n")
}
