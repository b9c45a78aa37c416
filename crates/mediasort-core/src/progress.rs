/// Trait for reporting run progress.
///
/// The CLI implements it with indicatif bars. All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    fn on_index_start(&self, _dest_root: &str) {}
    fn on_index_complete(&self, _files_indexed: usize, _duration_secs: f64) {}
    fn on_scan_start(&self, _source_root: &str) {}
    /// Called for each source file as it is discovered, before any hashing.
    fn on_file_found(&self, _path: &str) {}
    fn on_hash_start(&self, _total_files: usize) {}
    fn on_file_hashed(&self) {}
    fn on_scan_complete(&self, _accepted: usize, _duplicates: usize, _duration_secs: f64) {}
    fn on_copy_start(&self, _total_files: usize) {}
    fn on_file_copied(&self, _destination: &str) {}
    fn on_copy_complete(&self, _copied: usize, _failed: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
