#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::loom_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn stacks_lists_all_tags() {
    loom_cmd()
        .arg("stacks")
        .assert()
        .success()
        .stdout(predicate::str::contains("html"))
        .stdout(predicate::str::contains("nextjs"))
        .stdout(predicate::str::contains("svelte"));
}

#[test]
fn stacks_json_is_an_array_of_five() -> Result<()> {
    let out = loom_cmd().args(["stacks", "--format", "json"]).assert().success();
    let value: serde_json::Value = serde_json::from_slice(&out.get_output().stdout)?;
    let tags: Vec<_> = value
        .as_array()
        .expect("array")
        .iter()
        .map(|s| s["tag"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(tags, ["html", "react", "nextjs", "vue", "svelte"]);
    Ok(())
}

#[test]
fn materialize_html_from_stdin_as_json() -> Result<()> {
    let out = loom_cmd()
        .args(["materialize", "--stack", "html", "--format", "json"])
        .write_stdin("<div>Hi</div>")
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&out.get_output().stdout)?;
    assert_eq!(value["previewEntry"], "index.html");
    assert_eq!(value["files"][0]["language"], "html");
    assert!(
        value["files"][0]["content"]
            .as_str()
            .unwrap_or_default()
            .contains("<div>Hi</div>")
    );
    Ok(())
}

#[test]
fn materialize_writes_project_and_preview() -> Result<()> {
    let tmp = tempdir()?;
    let input = tmp.path().join("App.vue");
    std::fs::write(&input, "<template><p>{{ msg }}</p></template>\n<script setup>\nconst msg = 'hi';\n</script>\n")?;
    let out_dir = tmp.path().join("project");

    loom_cmd()
        .args(["materialize", "--stack", "vue", "--page-type", "contact form"])
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(out_dir.join("src/App.vue").exists());
    assert!(out_dir.join("preview.html").exists());
    let package = std::fs::read_to_string(out_dir.join("package.json"))?;
    assert!(package.contains("contact-form"));
    Ok(())
}

#[test]
fn materialize_rejects_unknown_stack() {
    loom_cmd()
        .args(["materialize", "--stack", "angular"])
        .write_stdin("<div/>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tech stack 'angular'"));
}

#[test]
fn preview_from_project_directory() -> Result<()> {
    let tmp = tempdir()?;
    std::fs::create_dir_all(tmp.path().join("src"))?;
    std::fs::write(
        tmp.path().join("src/App.tsx"),
        "export default function App() {\n  return <h1>Hello</h1>;\n}\n",
    )?;
    std::fs::write(tmp.path().join("package.json"), "{}")?;

    loom_cmd()
        .args(["preview", "--framework", "react", "--dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("Babel.transform"));
    Ok(())
}

#[test]
fn preview_requires_a_source() {
    loom_cmd()
        .args(["preview", "--framework", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input or --dir"));
}
