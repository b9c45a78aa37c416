use crate::config::AppConfig;
use crate::error::Error;
use crate::membership::MembershipSet;
use crate::placement::{self, PlacementReport};
use crate::progress::ProgressReporter;
use crate::scanner;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct SortEngine {
    config: AppConfig,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub index_duration: Duration,
    pub scan_duration: Duration,
    pub copy_duration: Duration,
    pub destination_files: usize,
    pub source_files: usize,
    pub duplicates_skipped: usize,
    pub unreadable_skipped: usize,
    pub planned: usize,
    pub dry_run: bool,
    pub placement: PlacementReport,
}

impl SortEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline:
    /// 1. Fingerprint the archive into a fresh membership set
    /// 2. Scan the source, keeping files with unseen content
    /// 3. Sort kept files by mtime, number them per month, copy
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<RunSummary, Error> {
        let source = &self.config.source;
        let dest = &self.config.dest;
        let policy = self.config.on_hash_error;

        if source.as_os_str().is_empty() {
            return Err(Error::Usage("source directory must not be empty".to_string()));
        }
        if dest.as_os_str().is_empty() {
            return Err(Error::Usage("destination directory must not be empty".to_string()));
        }

        info!(
            "Hash error policy: {:?}{}",
            policy,
            if self.config.dry_run { ", dry run" } else { "" }
        );
        let mut seen = MembershipSet::new();

        // Phase 1: index the archive
        info!("Parsing existing files in {}", dest.display());
        reporter.on_index_start(&dest.to_string_lossy());
        let index_start = Instant::now();
        let index = scanner::index_destination(dest, &mut seen, policy, reporter)?;
        let index_duration = index_start.elapsed();
        reporter.on_index_complete(index.files_indexed, index_duration.as_secs_f64());
        debug!(
            "Index completed in {:.2}s, {} files",
            index_duration.as_secs_f64(),
            index.files_indexed
        );

        // Phase 2: scan the source
        info!("Parsing source files in {}", source.display());
        reporter.on_scan_start(&source.to_string_lossy());
        let scan_start = Instant::now();
        let scan = scanner::collect_new(source, &mut seen, policy, reporter)?;
        let scan_duration = scan_start.elapsed();
        reporter.on_scan_complete(
            scan.accepted.len(),
            scan.duplicates,
            scan_duration.as_secs_f64(),
        );
        debug!(
            "Scan completed in {:.2}s, {} new, {} duplicates",
            scan_duration.as_secs_f64(),
            scan.accepted.len(),
            scan.duplicates
        );

        // Phase 3: place
        let placements = placement::plan(scan.accepted, dest);
        let planned = placements.len();
        let copy_start = Instant::now();
        let report = if self.config.dry_run {
            info!("Dry run, {} files would be copied", planned);
            placement::log_plan(&placements);
            PlacementReport::default()
        } else {
            info!("Copying {} files", planned);
            reporter.on_copy_start(planned);
            let report = placement::execute(&placements, reporter);
            reporter.on_copy_complete(
                report.copied,
                report.failed,
                copy_start.elapsed().as_secs_f64(),
            );
            report
        };
        let copy_duration = copy_start.elapsed();

        Ok(RunSummary {
            index_duration,
            scan_duration,
            copy_duration,
            destination_files: index.files_indexed,
            source_files: scan.files_seen,
            duplicates_skipped: scan.duplicates,
            unreadable_skipped: index.unreadable + scan.unreadable,
            planned,
            dry_run: self.config.dry_run,
            placement: report,
        })
    }
}
