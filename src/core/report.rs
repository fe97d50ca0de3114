use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use super::dummy::{original_name, read_dummy_size};

/// One regular file seen by a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Bytes on disk, or the recorded original size for a dummy.
    pub size: u64,
    pub dummy: bool,
    pub modified: Option<SystemTime>,
}

/// Files found under one report root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathReport {
    pub root: PathBuf,
    pub files: Vec<FileEntry>,
}

impl PathReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn dummy_count(&self) -> usize {
        self.files.iter().filter(|f| f.dummy).count()
    }

    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Walk `root` (a directory or a single file) and describe every regular file.
///
/// # Errors
/// Returns an error if `root` does not exist or cannot be walked.
pub fn collect_report(root: &Path) -> Result<PathReport> {
    if !root.exists() {
        bail!("no such file or directory: {}", root.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let meta = entry
            .metadata()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;
        let dummy = original_name(entry.file_name()).is_some();
        let recorded = if dummy {
            read_dummy_size(entry.path())?
        } else {
            None
        };
        files.push(FileEntry {
            path: entry.path().to_path_buf(),
            size: recorded.unwrap_or_else(|| meta.len()),
            dummy,
            modified: meta.modified().ok(),
        });
    }

    Ok(PathReport {
        root: root.to_path_buf(),
        files,
    })
}
