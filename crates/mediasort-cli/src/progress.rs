use indicatif::{ProgressBar, ProgressStyle};
use mediasort_core::ProgressReporter;
use std::sync::Mutex;
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Index/scan phases: bar over the files being fingerprinted
/// - Copy phase: bar over the planned copies
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(pb);
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }

    fn counting_bar(total: usize, label: &str) -> ProgressBar {
        let pb = ProgressBar::new(total as u64);
        let template = format!(
            "  {{spinner:.cyan}} {} [{{bar:30.cyan/dim}}] {{pos}}/{{len}} files ({{eta}} remaining)",
            label
        );
        if let Ok(style) = ProgressStyle::with_template(&template) {
            pb.set_style(style.progress_chars("━╸─").tick_chars(TICK_CHARS));
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

impl Default for CliReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self, source_root: &str) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars(TICK_CHARS));
        }
        pb.set_message(format!("Listing {}...", source_root));
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_file_found(&self, path: &str) {
        self.with_bar(|pb| pb.set_message(format!("Found {}", path)));
    }

    fn on_hash_start(&self, total_files: usize) {
        self.set_bar(Self::counting_bar(total_files, "Hashing"));
    }

    fn on_file_hashed(&self) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_index_complete(&self, files_indexed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Archive indexed: {} files in {:.2}s",
            files_indexed, duration_secs
        );
    }

    fn on_scan_complete(&self, accepted: usize, duplicates: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Source scanned: {} new, {} already archived in {:.2}s",
            accepted, duplicates, duration_secs
        );
    }

    fn on_copy_start(&self, total_files: usize) {
        self.set_bar(Self::counting_bar(total_files, "Copying"));
    }

    fn on_file_copied(&self, _destination: &str) {
        self.with_bar(|pb| pb.inc(1));
    }

    fn on_copy_complete(&self, copied: usize, failed: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Copy complete: {} copied, {} failed in {:.2}s",
            copied, failed, duration_secs
        );
    }
}
