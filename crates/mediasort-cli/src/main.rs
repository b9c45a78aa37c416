mod commands;
mod logging;
mod progress;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::*;
use commands::Cli;
use dotenv::dotenv;
use mediasort_core::{RunSummary, SortEngine};
use progress::CliReporter;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    dotenv().ok();

    // Usage errors exit here, before any file is touched.
    let args = Cli::parse_from(commands::normalize_args(std::env::args_os()));

    let _guard = logging::init_logger();

    match run(&args) {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> anyhow::Result<RunSummary> {
    let config = mediasort_core::config::load_configuration(&args.overrides())
        .context("Error loading configuration")?;
    debug!("Configuration: {:?}", config);

    let engine = SortEngine::new(config);
    let reporter = CliReporter::new();
    let summary = engine.run(&reporter)?;
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    println!();
    info!(
        "Index: {}, Scan: {}, Copy: {}",
        format!("{:.2}s", summary.index_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.copy_duration.as_secs_f64()).green(),
    );
    info!(
        "{} archive files, {} source files, {} already archived, {} unreadable",
        format!("{}", summary.destination_files).cyan(),
        format!("{}", summary.source_files).cyan(),
        format!("{}", summary.duplicates_skipped).yellow(),
        format!("{}", summary.unreadable_skipped).red(),
    );
    if summary.dry_run {
        info!(
            "Dry run: {} files would be copied",
            format!("{}", summary.planned).green()
        );
        return;
    }
    let report = &summary.placement;
    info!(
        "{} copied ({} bytes), {} failed, {} timestamp warnings",
        format!("{}", report.copied).green(),
        report.bytes_copied,
        format!("{}", report.failed).red(),
        format!("{}", report.timestamp_warnings).yellow(),
    );
}
