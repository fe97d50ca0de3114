use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use super::dummy::{dummy_name, write_dummy};

/// What a mirror run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub files: usize,
    pub dirs: usize,
    /// Entries that are neither regular files nor directories (symlinks, sockets).
    pub skipped: usize,
}

/// Recreate the directory structure of `source` under `target`, replacing
/// every regular file with a dummy.
///
/// # Errors
/// Returns an error if `source` is not a directory, if `target` lies inside
/// `source`, or on any I/O failure while walking or writing.
pub fn mirror_tree(source: &Path, target: &Path) -> Result<MirrorSummary> {
    if !source.is_dir() {
        bail!("source is not a directory: {}", source.display());
    }
    let source_abs = source
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", source.display()))?;
    // Must run before anything is created
    if resolve_target(target)?.starts_with(&source_abs) {
        bail!(
            "target {} must not be inside source {}",
            target.display(),
            source.display()
        );
    }

    fs::create_dir_all(target)
        .with_context(|| format!("failed to create target {}", target.display()))?;
    let target_abs = target
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", target.display()))?;

    let mut summary = MirrorSummary::default();
    for entry in WalkDir::new(&source_abs).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", source.display()))?;
        let rel = entry
            .path()
            .strip_prefix(&source_abs)
            .context("walked outside the source tree")?;
        let dest = target_abs.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("failed to create {}", dest.display()))?;
            summary.dirs += 1;
        } else if file_type.is_file() {
            let size = entry
                .metadata()
                .with_context(|| format!("failed to stat {}", entry.path().display()))?
                .len();
            let dest = dest.with_file_name(dummy_name(entry.file_name()));
            write_dummy(&dest, size)?;
            tracing::trace!(path = %rel.display(), size, "mirrored");
            summary.files += 1;
        } else {
            tracing::debug!(path = %rel.display(), "skipping non-regular entry");
            summary.skipped += 1;
        }
    }

    Ok(summary)
}

/// Canonical form of a path that may not exist yet: the deepest existing
/// ancestor is canonicalized and the missing components are appended.
fn resolve_target(target: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(target)
        .with_context(|| format!("failed to resolve {}", target.display()))?;

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("failed to resolve {}", target.display()))?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dummy::read_dummy_size;

    #[test]
    fn mirrors_nested_tree_as_dummies() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("sub/deeper")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("top.txt"), "abc").unwrap();
        fs::write(src.join("sub/deeper/leaf.bin"), vec![0_u8; 10]).unwrap();
        let dst = tmp.path().join("dst");

        let summary = mirror_tree(&src, &dst).unwrap();

        assert_eq!(summary.files, 2);
        assert_eq!(summary.dirs, 3);
        assert!(dst.join("empty").is_dir());
        assert_eq!(read_dummy_size(&dst.join("top.txt.dummy")).unwrap(), Some(3));
        assert_eq!(
            read_dummy_size(&dst.join("sub/deeper/leaf.bin.dummy")).unwrap(),
            Some(10)
        );
        assert!(!dst.join("top.txt").exists());
    }

    #[test]
    fn missing_source_is_an_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = mirror_tree(&tmp.path().join("nope"), &tmp.path().join("dst")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn target_inside_source_is_refused() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "x").unwrap();
        let inner = tmp.path().join("inner");
        let err = mirror_tree(tmp.path(), &inner).unwrap_err();
        assert!(err.to_string().contains("must not be inside"));
        assert!(!inner.exists());
    }

    #[test]
    fn nested_missing_target_inside_source_is_refused_without_creating_it() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("a"), "x").unwrap();
        let outer = tmp.path().join("new");
        let err = mirror_tree(tmp.path(), &outer.join("deeper")).unwrap_err();
        assert!(err.to_string().contains("must not be inside"));
        assert!(!outer.exists());
    }

    #[test]
    fn missing_target_components_are_appended_to_existing_ancestor() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let resolved = resolve_target(&tmp.path().join("x/y")).unwrap();
        assert_eq!(resolved, tmp.path().canonicalize().unwrap().join("x/y"));
    }
}
