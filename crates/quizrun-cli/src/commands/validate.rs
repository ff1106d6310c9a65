//! The `quizrun validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizrun_core::model::PartId;
use quizrun_core::normalize::normalize_body;

pub fn execute(dir: PathBuf) -> Result<()> {
    let files = question_files(&dir)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no question files (.js or .json) found in {}",
        dir.display()
    );

    let mut failures = 0;
    let mut total_warnings = 0;

    for path in &files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let part = part_for(path);
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        match normalize_body(&body, &name, &part) {
            Ok(normalized) => {
                println!(
                    "{name}: part {part}, {} questions ({:?})",
                    normalized.questions.len(),
                    normalized.strategy
                );
                for w in &normalized.warnings {
                    println!("  [record {}] WARNING: {}", w.index, w.error);
                }
                total_warnings += normalized.warnings.len();
                if normalized.questions.is_empty() {
                    println!("  ERROR: no usable questions");
                    failures += 1;
                }
            }
            Err(e) => {
                println!("{name}: ERROR: {e}");
                failures += 1;
            }
        }
    }

    if total_warnings > 0 {
        println!("\n{total_warnings} record(s) skipped.");
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} question file(s) failed", files.len());
    }
    println!("All question files valid.");
    Ok(())
}

fn question_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        let is_question_file = path
            .extension()
            .is_some_and(|ext| ext == "js" || ext == "json");
        if path.is_file() && is_question_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `test3.js` and `part3.json` both belong to part `3`.
fn part_for(path: &Path) -> PartId {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = stem
        .strip_prefix("test")
        .or_else(|| stem.strip_prefix("part"))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(stem.as_str());
    PartId::new(id)
}
