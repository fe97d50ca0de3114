use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::{MIRROR, parse_options};
use crate::{core, registry::Application, status};

/// Options accepted by `mirror`.
#[derive(Parser, Debug, Clone)]
#[command(name = "mirror", about = "Mirror a file tree as dummy files")]
pub struct MirrorArgs {
    /// Directory to mirror
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory to create the dummy tree in
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Write into TARGET even if it is not empty
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorApp;

impl Application for MirrorApp {
    fn run(&self, options: &[String]) -> Result<i32> {
        let args: MirrorArgs = match parse_options(MIRROR, options) {
            Ok(args) => args,
            Err(code) => return Ok(code),
        };

        if !args.force && is_non_empty_dir(&args.target)? {
            tracing::warn!(
                "target {} is not empty; pass --force to mirror into it anyway",
                args.target.display()
            );
            return Ok(status::FAILURE);
        }

        let summary = core::mirror_tree(&args.source, &args.target)?;
        tracing::info!(
            files = summary.files,
            dirs = summary.dirs,
            skipped = summary.skipped,
            "mirror complete"
        );
        println!(
            "Created {} dummy file(s) in {}",
            summary.files,
            args.target.display()
        );
        Ok(status::SUCCESS)
    }
}

fn is_non_empty_dir(path: &std::path::Path) -> Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    let mut entries =
        fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(entries.next().is_some())
}
