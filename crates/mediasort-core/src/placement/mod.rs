pub mod counter;

pub use counter::PeriodCounter;

use crate::copier::copy_with_mtime;
use crate::descriptor::FileDescriptor;
use crate::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Planned copy of one accepted file.
#[derive(Debug, Clone)]
pub struct Placement {
    pub descriptor: FileDescriptor,
    pub sequence: u32,
    pub destination: PathBuf,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlacementReport {
    pub copied: usize,
    pub failed: usize,
    pub bytes_copied: u64,
    pub directory_warnings: usize,
    pub timestamp_warnings: usize,
}

/// Orders accepted files by mtime and numbers them within their month,
/// continuing after any numbers already used in that month's archive folder.
///
/// The sort is stable: files with equal mtimes keep the order the scanner
/// discovered them in, so numbering is deterministic across runs.
pub fn plan(mut accepted: Vec<FileDescriptor>, dest_root: &Path) -> Vec<Placement> {
    accepted.sort_by_key(|descriptor| descriptor.modified);

    let mut counter = PeriodCounter::resuming(dest_root);
    accepted
        .into_iter()
        .map(|descriptor| {
            let sequence = counter.next(descriptor.period());
            let destination = descriptor.destination_path(dest_root, sequence);
            Placement {
                descriptor,
                sequence,
                destination,
            }
        })
        .collect()
}

/// Copies every placement in order. A failed copy is logged and counted; it
/// never stops the remaining copies.
pub fn execute(placements: &[Placement], reporter: &dyn ProgressReporter) -> PlacementReport {
    let mut report = PlacementReport::default();

    for placement in placements {
        match copy_with_mtime(&placement.descriptor, &placement.destination) {
            Ok(outcome) => {
                report.copied += 1;
                report.bytes_copied += outcome.bytes;
                if outcome.directory_warning {
                    report.directory_warnings += 1;
                }
                if !outcome.timestamp_restored() {
                    report.timestamp_warnings += 1;
                }
            }
            Err(err) => {
                error!("{}, copy stopped after {:?}", err, err.stage());
                report.failed += 1;
            }
        }
        reporter.on_file_copied(&placement.destination.to_string_lossy());
    }

    report
}

/// Logs what `execute` would do without touching the archive.
pub fn log_plan(placements: &[Placement]) {
    for placement in placements {
        info!(
            "Would copy {} -> {}",
            placement.descriptor.source_path.display(),
            placement.destination.display()
        );
    }
}
