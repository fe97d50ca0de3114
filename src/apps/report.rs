use std::{path::PathBuf, time::SystemTime};

use anyhow::Result;
use clap::Parser;
use console::Style;

use super::{REPORT, parse_options};
use crate::{
    core::{self, PathReport},
    registry::Application,
    status,
};

/// Options accepted by `report`.
#[derive(Parser, Debug, Clone)]
#[command(name = "report", about = "Summarize real and dummy files")]
pub struct ReportArgs {
    /// List every file, not just the totals
    #[arg(short, long)]
    pub verbose: bool,

    /// Files or directories to report on
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportApp;

impl Application for ReportApp {
    fn run(&self, options: &[String]) -> Result<i32> {
        let args: ReportArgs = match parse_options(REPORT, options) {
            Ok(args) => args,
            Err(code) => return Ok(code),
        };

        for path in &args.paths {
            let report = core::collect_report(path)?;
            print_report(&report, args.verbose);
        }
        Ok(status::SUCCESS)
    }
}

fn print_report(report: &PathReport, verbose: bool) {
    let header = Style::new().bold();
    let dim = Style::new().dim();

    println!("{}", header.apply_to(report.root.display()));
    if verbose {
        for file in &report.files {
            let marker = if file.dummy { "dummy" } else { "real " };
            let modified = file
                .modified
                .map_or_else(|| "-".to_string(), format_modified);
            println!(
                "  {} {:>12}  {}  {}",
                marker,
                file.size,
                dim.apply_to(modified),
                file.path.display()
            );
        }
    }
    println!(
        "  files: {}  dummies: {}  bytes: {}",
        report.file_count(),
        report.dummy_count(),
        report.total_bytes()
    );
}

fn format_modified(at: SystemTime) -> String {
    use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};
    let utc = OffsetDateTime::from(at);
    let local = UtcOffset::current_local_offset().map_or(utc, |offset| utc.to_offset(offset));
    local.format(&Rfc3339).unwrap_or_else(|_| local.to_string())
}
