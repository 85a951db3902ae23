mod analyze;
mod extract;
mod model;
mod report;
mod utils;

use crate::analyze::ReporterAggregator;
use crate::extract::{parse_document, IssueExtractor};
use crate::model::Settings;
use crate::report::{CsvReport, WrittenReport};
use crate::utils::{MultiProgressPhases, PhaseFinish};
use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::MultiProgress;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Convert a tracker issue export into CSV tables")]
struct Args {
    /// Issue export document (RSS/XML).
    input: PathBuf,
    /// JSON settings file.
    #[arg(long = "config")]
    config_path: Option<PathBuf>,
    /// Directory receiving both tables; must already exist. Existing tables
    /// are never overwritten.
    #[arg(long = "output_dir")]
    output_dir: Option<PathBuf>,
    /// Record an empty resolution id instead of failing on unresolved items.
    #[arg(long = "allow_missing_resolution")]
    allow_missing_resolution: bool,
    /// Debug logging on stderr (hides progress spinners).
    #[arg(long = "debug")]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::init_tracing(args.debug);

    let written = run(&args)?;
    println!("Issues extracted to `{}`", written.issues_path.display());
    println!(
        "Reporters summarized to `{}`",
        written.reporters_path.display()
    );
    Ok(())
}

fn run(args: &Args) -> Result<WrittenReport> {
    let settings = load_settings(args)?;
    tracing::debug!(?settings, "settings loaded");

    let multi_progress = MultiProgress::phases(args.debug);

    let read_pb = multi_progress.start_phase(format!("Read file `{}` ...", args.input.display()));
    let xml = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let doc = parse_document(&xml).with_context(|| format!("parsing {}", args.input.display()))?;
    read_pb.complete(format!(
        "Completed parsing file `{}`",
        args.input.display()
    ));

    let extract_pb = multi_progress.start_phase("Extract issues ...");
    let issues = doc
        .extract_issues(settings.missing_resolution)
        .with_context(|| format!("extracting issues from {}", args.input.display()))?;
    extract_pb.complete(format!(
        "Completed extraction (find {} issues)",
        issues.len()
    ));

    let summary_pb = multi_progress.start_phase("Summarize reporters ...");
    let reporters = issues.summarize();
    summary_pb.complete(format!(
        "Completed summary (find {} reporters)",
        reporters.len()
    ));

    let write_pb = multi_progress.start_phase("Write tables ...");
    let report = CsvReport::new(&settings.output_dir, settings.naming.clone());
    let written = report.write(&issues, &reporters, &Local::now())?;
    write_pb.complete(format!(
        "Completed writing to `{}`",
        settings.output_dir.display()
    ));

    Ok(written)
}

fn load_settings(args: &Args) -> Result<Settings> {
    let settings = match &args.config_path {
        Some(path) => Settings::from_config(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    Ok(settings.with_overrides(args.output_dir.clone(), args.allow_missing_resolution))
}
