//! File helpers: reading source input, loading and writing project trees.

use std::fs;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};
use loom_core::{GeneratedFile, GenerationResult};

/// Name of the preview document written next to a project.
pub const PREVIEW_FILE: &str = "preview.html";

/// Directories never descended into when loading a project.
const SKIPPED_DIRS: [&str; 4] = ["node_modules", "dist", "target", ".next"];

/// Read source from `path`, or stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read source from stdin")?;
            Ok(buf)
        },
    }
}

/// Load every text file under `root` as a generated file with a `/`-separated path.
pub fn load_project(root: &Path) -> Result<Vec<GeneratedFile>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    let mut files = Vec::new();
    collect(root, root, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<GeneratedFile>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') {
            continue;
        }
        if path.is_dir() {
            if !SKIPPED_DIRS.contains(&name.as_ref()) {
                collect(root, &path, files)?;
            }
            continue;
        }
        // Binary assets are not sources.
        let Ok(content) = fs::read_to_string(&path) else {
            tracing::debug!(path = %path.display(), "skipping non-UTF-8 file");
            continue;
        };
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(GeneratedFile::new(relative, content));
    }
    Ok(())
}

/// Write a project under `out`, plus [`PREVIEW_FILE`] when a preview exists.
///
/// Returns the written paths.
pub fn write_project(out: &Path, result: &GenerationResult) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.files.len() + 1);
    for file in &result.files {
        let target = out.join(safe_relative(&file.path)?);
        write_file(&target, &file.content)?;
        written.push(target);
    }
    if let Some(preview) = &result.preview_html {
        let target = out.join(PREVIEW_FILE);
        write_file(&target, preview)?;
        written.push(target);
    }
    Ok(written)
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Reject paths that would escape the output directory.
fn safe_relative(path: &str) -> Result<PathBuf> {
    let candidate = PathBuf::from(path);
    if candidate
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        bail!("refusing to write outside the output directory: {path}");
    }
    Ok(candidate)
}
