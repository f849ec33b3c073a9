//! Writing generation results to plain-text files.
//!
//! Filenames are derived from the task kind and the result label, with
//! spaces replaced by underscores so the names stay shell-friendly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::prompts::TaskKind;
use crate::session::GenerationResult;

/// Replace spaces with underscores and drop characters that are unsafe in
/// filenames. Never returns an empty string.
fn sanitize(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

/// The filename a result exports to, before any directory is applied.
pub fn export_filename(result: &GenerationResult) -> String {
    let label = sanitize(&result.label);
    match result.task() {
        TaskKind::Syllabus => format!("{label}_syllabus.txt"),
        TaskKind::CourseDetail => format!("{label}_details.txt"),
        TaskKind::SkillGap => format!("skill_gap_analysis_{label}.txt"),
        TaskKind::Schedule => "study_schedule.txt".to_string(),
        TaskKind::Comparison => format!("comparison_{label}.txt"),
        TaskKind::Roadmap => format!("learning_roadmap_{label}.txt"),
    }
}

/// Write the result text into `dir`, creating the directory if needed.
/// Returns the full path of the written file.
pub fn write_export(dir: &Path, result: &GenerationResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(export_filename(result));
    fs::write(&path, &result.text)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), task = result.task().label(), "exported result");
    Ok(path)
}
