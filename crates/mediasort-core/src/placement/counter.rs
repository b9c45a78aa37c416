use crate::descriptor::Period;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Per-(year, month) sequence numbers.
///
/// A period starts at 1, or right after the highest `SSSSS-` prefix already
/// in its archive folder, so a later run never reuses a name written by an
/// earlier one.
#[derive(Debug, Default)]
pub struct PeriodCounter {
    counts: HashMap<Period, u32>,
    archive: Option<PathBuf>,
}

impl PeriodCounter {
    /// Counter that continues the numbering found under `dest_root`.
    pub fn resuming(dest_root: &Path) -> Self {
        Self {
            counts: HashMap::new(),
            archive: Some(dest_root.to_path_buf()),
        }
    }

    pub fn next(&mut self, period: Period) -> u32 {
        let archive = self.archive.as_deref();
        let count = self.counts.entry(period).or_insert_with(|| match archive {
            Some(root) => highest_archived_sequence(&period.directory(root)),
            None => 0,
        });
        *count += 1;
        *count
    }
}

/// Highest sequence prefix among the names in `dir`; 0 when the folder is
/// missing or holds no numbered files.
pub fn highest_archived_sequence(dir: &Path) -> u32 {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() != io::ErrorKind::NotFound {
                warn!("Could not list {}: {}", dir.display(), err);
            }
            return 0;
        }
    };

    let highest = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| sequence_prefix(&entry.file_name().to_string_lossy()))
        .max()
        .unwrap_or(0);
    if highest > 0 {
        debug!("{} already numbered up to {}", dir.display(), highest);
    }
    highest
}

fn sequence_prefix(name: &str) -> Option<u32> {
    let (digits, _) = name.split_once('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
