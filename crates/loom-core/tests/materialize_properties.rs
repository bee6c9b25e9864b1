#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use loom_core::{GeneratorConfig, MaterializerRouter, PreviewCompiler, TechStack};
use proptest::prelude::*;

fn arb_source() -> impl Strategy<Value = String> {
    prop_oneof![
        // bare markup
        "[a-zA-Z0-9 <>/=\"{}().;:-]{0,200}",
        // declared components
        "[A-Z][a-z]{2,8}".prop_map(|name| format!(
            "function {name}() {{\n  return <div>{name}</div>;\n}}"
        )),
        // single-file components
        "[a-z ]{0,40}".prop_map(|text| format!(
            "<template><p>{text}</p></template>\n<script setup>\nconst n = 1;\n</script>"
        )),
        Just(String::new()),
    ]
}

fn arb_config() -> impl Strategy<Value = GeneratorConfig> {
    prop::option::of("[a-zA-Z ]{0,24}").prop_map(|page_type| GeneratorConfig {
        page_type,
        ..GeneratorConfig::default()
    })
}

proptest! {
    #[test]
    fn every_stack_yields_unique_paths_and_valid_entry(raw in arb_source(), config in arb_config()) {
        let router = MaterializerRouter::new();
        for stack in TechStack::ALL {
            let result = router.materialize(stack.as_str(), &raw, &config).unwrap();

            let mut seen = HashSet::new();
            for file in &result.files {
                prop_assert!(seen.insert(file.path.as_str()), "duplicate path {}", file.path);
            }
            if !result.files.is_empty() {
                prop_assert!(result.file(&result.preview_entry).is_some());
            }
            prop_assert!(result.validate().is_ok());
            prop_assert_eq!(result.framework, stack);
        }
    }

    #[test]
    fn materialization_is_idempotent(raw in arb_source(), config in arb_config()) {
        let router = MaterializerRouter::new();
        for stack in TechStack::ALL {
            let first = router.materialize(stack.as_str(), &raw, &config).unwrap();
            let second = router.materialize(stack.as_str(), &raw, &config).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn full_documents_round_trip(body in "[a-zA-Z0-9 <>/]{0,120}") {
        let raw = format!("<!DOCTYPE html>\n<html><body>{body}</body></html>");
        let result = MaterializerRouter::new()
            .materialize("html", &raw, &GeneratorConfig::default())
            .unwrap();
        prop_assert_eq!(result.files.len(), 1);
        prop_assert_eq!(&result.files[0].content, &raw);
    }

    #[test]
    fn preview_never_panics(raw in ".{0,300}") {
        let compiler = PreviewCompiler::new();
        for stack in TechStack::ALL {
            let doc = compiler.compile_source(&raw, stack);
            prop_assert!(!doc.is_empty());
        }
    }
}

#[test]
fn default_exports_are_not_rewrapped() {
    let raw = "import { useState } from 'react';\n\nexport default function Pricing() {\n  const [n] = useState(0);\n  return <p>{n}</p>;\n}\n";
    let router = MaterializerRouter::new();

    let react = router.materialize("react", raw, &GeneratorConfig::default()).unwrap();
    assert_eq!(react.file("src/App.tsx").unwrap().content, raw);

    let next = router.materialize("nextjs", raw, &GeneratorConfig::default()).unwrap();
    let page = &next.file("app/page.tsx").unwrap().content;
    assert!(page.ends_with(raw));
    assert_eq!(page.matches("export default").count(), 1);
}

#[test]
fn html_fragment_example() {
    let result = MaterializerRouter::new()
        .materialize("html", "<div>Hi</div>", &GeneratorConfig::default())
        .unwrap();

    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].path, "index.html");
    assert!(result.files[0].content.contains("<div>Hi</div>"));
    assert_eq!(result.preview_entry, "index.html");
    assert_eq!(result.preview_html.as_deref(), Some(result.files[0].content.as_str()));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["files"][0]["language"], "html");
    assert_eq!(json["previewEntry"], "index.html");
}

#[test]
fn missing_tag_is_fatal() {
    let err = MaterializerRouter::new()
        .materialize("", "<div/>", &GeneratorConfig::default())
        .unwrap_err();
    assert_eq!(err.category(), "config");
    assert!(!err.is_recoverable());
}
