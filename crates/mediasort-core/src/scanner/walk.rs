use crate::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walkdir::WalkDir;

/// Every regular file under `root`, in a reproducible discovery order (each
/// directory's entries sorted by file name). Directories are descended into,
/// symlinks are not followed. Unreadable entries are logged and skipped.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        info!("{} does not exist yet, nothing to scan", root.display());
        return Vec::new();
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                let skipped = Error::ScanEntry {
                    root: root.to_path_buf(),
                    message: err.to_string(),
                };
                error!("{}", skipped);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}
