use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{RESTORE, parse_options};
use crate::{core, registry::Application, status};

/// Options accepted by `restore`.
#[derive(Parser, Debug, Clone)]
#[command(name = "restore", about = "Rename dummy files back to their original names")]
pub struct RestoreArgs {
    /// Directory containing dummy files
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Print the planned renames without touching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RestoreApp;

impl Application for RestoreApp {
    fn run(&self, options: &[String]) -> Result<i32> {
        let args: RestoreArgs = match parse_options(RESTORE, options) {
            Ok(args) => args,
            Err(code) => return Ok(code),
        };

        let summary = core::restore_names(&args.dir, args.dry_run)?;
        for (from, to) in &summary.renamed {
            if args.dry_run {
                println!("would rename {} -> {}", from.display(), to.display());
            } else {
                tracing::debug!(from = %from.display(), to = %to.display(), "restored");
            }
        }
        println!(
            "{} {} file(s), skipped {}",
            if args.dry_run { "Would restore" } else { "Restored" },
            summary.renamed.len(),
            summary.skipped.len()
        );

        if summary.skipped.is_empty() {
            Ok(status::SUCCESS)
        } else {
            Ok(status::FAILURE)
        }
    }
}
