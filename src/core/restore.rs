use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use super::dummy::original_name;

/// Outcome of a restore pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// `(dummy, original)` pairs, renamed or (for a dry run) planned.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Dummies left alone because their original name is already taken.
    pub skipped: Vec<PathBuf>,
}

/// Rename every dummy under `dir` back to its original name.
///
/// With `dry_run` nothing on disk changes; the summary lists what would
/// have been renamed.
///
/// # Errors
/// Returns an error if `dir` is not a directory or on I/O failure.
pub fn restore_names(dir: &Path, dry_run: bool) -> Result<RestoreSummary> {
    if !dir.is_dir() {
        bail!("not a directory: {}", dir.display());
    }

    // Collect first so renames do not disturb the walk
    let mut planned = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(original) = original_name(entry.file_name()) {
            let to = entry.path().with_file_name(original);
            planned.push((entry.into_path(), to));
        }
    }

    // Track earlier moves so a dry run sees the same tree a real run would
    let mut claimed = HashSet::new();
    let mut vacated = HashSet::new();
    let mut summary = RestoreSummary::default();
    for (from, to) in planned {
        let occupied = fs::symlink_metadata(&to).is_ok() && !vacated.contains(&to);
        if occupied || claimed.contains(&to) {
            tracing::warn!(
                "not restoring {}: {} already exists",
                from.display(),
                to.display()
            );
            summary.skipped.push(from);
            continue;
        }
        if !dry_run {
            fs::rename(&from, &to).with_context(|| {
                format!("failed to rename {} to {}", from.display(), to.display())
            })?;
        }
        claimed.insert(to.clone());
        vacated.insert(from.clone());
        summary.renamed.push((from, to));
    }

    Ok(summary)
}
