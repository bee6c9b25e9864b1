//! Component module normalization shared by the React and Next.js materializers.

use crate::analysis;
use crate::materialize::scaffold::indent;

/// Hooks that get an import when a wrapped fragment uses them.
const IMPORTABLE_HOOKS: [&str; 8] = [
    "useState",
    "useEffect",
    "useRef",
    "useReducer",
    "useCallback",
    "useMemo",
    "useContext",
    "useLayoutEffect",
];

/// How the raw source was turned into a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModuleShape {
    /// Already default-exports a component; left untouched.
    Exported,
    /// Declares a component without exporting it; an export line was appended.
    Declared,
    /// Bare markup wrapped in a synthesized component.
    Wrapped,
}

/// Turn raw source into a module that default-exports a component.
///
/// Existing default exports are never re-wrapped. Bare markup is placed inside a
/// component named `wrapper_name` returning a fragment, with imports for the hooks it
/// references.
pub(crate) fn component_module(raw: &str, wrapper_name: &str) -> (String, ModuleShape) {
    if analysis::has_default_export(raw) {
        return (raw.to_string(), ModuleShape::Exported);
    }
    if let Some(name) = analysis::detect_component_name(raw) {
        let module = format!("{}\n\nexport default {name};\n", raw.trim_end());
        return (module, ModuleShape::Declared);
    }

    let hooks: Vec<_> = IMPORTABLE_HOOKS
        .iter()
        .copied()
        .filter(|hook| analysis::contains_identifier(raw, hook))
        .collect();
    let imports = if hooks.is_empty() {
        String::new()
    } else {
        format!("import {{ {} }} from 'react';\n\n", hooks.join(", "))
    };
    let body = indent(raw.trim(), 6);
    let module = format!(
        "{imports}export default function {wrapper_name}() {{\n  return (\n    <>\n{body}\n    </>\n  );\n}}\n"
    );
    (module, ModuleShape::Wrapped)
}

/// Prepend `'use client';` when the module is interactive and lacks the directive.
pub(crate) fn with_client_boundary(module: String) -> String {
    if analysis::needs_client_boundary(&module) && !analysis::has_client_directive(&module) {
        format!("'use client';\n\n{module}")
    } else {
        module
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_export_is_left_alone() {
        let raw = "export default function Landing() {\n  return <main />;\n}\n";
        let (module, shape) = component_module(raw, "App");
        assert_eq!(module, raw);
        assert_eq!(shape, ModuleShape::Exported);
    }

    #[test]
    fn test_declared_component_gets_export() {
        let (module, shape) = component_module("const Hero = () => <h1>Hi</h1>;", "App");
        assert_eq!(module, "const Hero = () => <h1>Hi</h1>;\n\nexport default Hero;\n");
        assert_eq!(shape, ModuleShape::Declared);
    }

    #[test]
    fn test_fragment_is_wrapped_with_hook_imports() {
        let (module, shape) =
            component_module("<button onClick={() => useState}>Go</button>", "Page");
        assert_eq!(shape, ModuleShape::Wrapped);
        assert!(module.starts_with("import { useState } from 'react';\n\n"));
        assert!(module.contains("export default function Page() {"));
        assert!(module.contains("      <button onClick"));
    }

    #[test]
    fn test_empty_source_wraps_empty_fragment() {
        let (module, _) = component_module("", "App");
        assert_eq!(
            module,
            "export default function App() {\n  return (\n    <>\n\n    </>\n  );\n}\n"
        );
    }

    #[test]
    fn test_client_boundary_added_once() {
        let interactive = "export default function A() { return <a onClick={go} />; }".to_string();
        let bounded = with_client_boundary(interactive);
        assert!(bounded.starts_with("'use client';\n\n"));
        assert_eq!(with_client_boundary(bounded.clone()), bounded);

        let inert = "export default function A() { return <p />; }".to_string();
        assert_eq!(with_client_boundary(inert.clone()), inert);
    }
}
