use crate::descriptor::FileDescriptor;
use crate::error::CopyError;
use filetime::FileTime;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::{error, warn};

/// How far a single copy got. `DirectoryReady` and `TimestampRestored`
/// failures are warnings; the other steps abort the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStage {
    Pending,
    Opened,
    DirectoryReady,
    Created,
    Copied,
    TimestampRestored,
}

#[derive(Debug)]
pub struct CopyOutcome {
    pub bytes: u64,
    /// Last step completed. `Copied` when the mtime could not be restored.
    pub stage: CopyStage,
    pub directory_warning: bool,
}

impl CopyOutcome {
    pub fn timestamp_restored(&self) -> bool {
        self.stage == CopyStage::TimestampRestored
    }
}

/// Copies the descriptor's file to `destination`, creating missing parent
/// directories, then stamps it with the source mtime. An existing file at
/// `destination` is never overwritten.
pub fn copy_with_mtime(
    descriptor: &FileDescriptor,
    destination: &Path,
) -> Result<CopyOutcome, CopyError> {
    let mut src = File::open(&descriptor.source_path).map_err(|source| CopyError::Open {
        path: descriptor.source_path.clone(),
        source,
    })?;

    let mut directory_warning = false;
    if let Some(parent) = destination.parent() {
        if let Err(err) = fs::create_dir_all(parent) {
            if err.kind() != io::ErrorKind::AlreadyExists {
                error!(
                    "Could not create destination directory {}: {}",
                    parent.display(),
                    err
                );
                directory_warning = true;
            }
        }
    }
    let reached = if directory_warning {
        CopyStage::Opened
    } else {
        CopyStage::DirectoryReady
    };

    let mut dst = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)
        .map_err(|source| CopyError::Create {
            path: destination.to_path_buf(),
            reached,
            source,
        })?;

    let bytes = match io::copy(&mut src, &mut dst) {
        Ok(bytes) => bytes,
        Err(source) => {
            drop(dst);
            // Leave no truncated file behind, a later run must be able to retry.
            if let Err(err) = fs::remove_file(destination) {
                warn!(
                    "Could not remove partial copy {}: {}",
                    destination.display(),
                    err
                );
            }
            return Err(CopyError::Write {
                path: destination.to_path_buf(),
                source,
            });
        }
    };
    drop(dst);

    let mtime = FileTime::from_system_time(descriptor.modified);
    let stage = match filetime::set_file_mtime(destination, mtime) {
        Ok(()) => CopyStage::TimestampRestored,
        Err(err) => {
            warn!("Could not update times for {}: {}", destination.display(), err);
            CopyStage::Copied
        }
    };

    Ok(CopyOutcome {
        bytes,
        stage,
        directory_warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::Fingerprint;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use tempfile::tempdir;

    fn descriptor_for(path: PathBuf, modified: SystemTime) -> FileDescriptor {
        FileDescriptor {
            fingerprint: Fingerprint::from_bytes([0u8; 32]),
            size: fs::metadata(&path).map(|m| m.len()).unwrap_or(0),
            source_path: path,
            modified,
        }
    }

    #[test]
    fn test_copy_creates_dirs_and_restores_mtime() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("IMG 0001.jpg");
        fs::write(&src, b"jpeg bytes").unwrap();
        let modified = UNIX_EPOCH + Duration::new(1_614_600_000, 123_456_000);
        let descriptor = descriptor_for(src, modified);

        let destination = tmp.path().join("archive/2021/03-March/00001-IMG-0001.jpg");
        let outcome = copy_with_mtime(&descriptor, &destination).unwrap();

        assert_eq!(outcome.bytes, 10);
        assert!(outcome.timestamp_restored());
        assert!(!outcome.directory_warning);
        assert_eq!(fs::read(&destination).unwrap(), b"jpeg bytes");
        let metadata = fs::metadata(&destination).unwrap();
        let copied = FileTime::from_last_modification_time(&metadata);
        assert_eq!(copied.unix_seconds(), 1_614_600_000);
    }

    #[test]
    fn test_missing_source_is_open_error() {
        let tmp = tempdir().unwrap();
        let descriptor = descriptor_for(tmp.path().join("vanished.jpg"), SystemTime::now());
        let destination = tmp.path().join("out/00001-vanished.jpg");

        let err = copy_with_mtime(&descriptor, &destination).unwrap_err();
        assert!(matches!(err, CopyError::Open { .. }));
        assert_eq!(err.stage(), CopyStage::Pending);
        assert!(!destination.exists());
    }

    #[test]
    fn test_existing_destination_is_not_overwritten() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("new.jpg");
        fs::write(&src, b"new content").unwrap();
        let destination = tmp.path().join("00001-new.jpg");
        fs::write(&destination, b"archived").unwrap();

        let err = copy_with_mtime(&descriptor_for(src, SystemTime::now()), &destination)
            .unwrap_err();
        assert!(matches!(err, CopyError::Create { .. }));
        assert_eq!(err.stage(), CopyStage::DirectoryReady);
        assert_eq!(err.path(), &destination);
        assert_eq!(fs::read(&destination).unwrap(), b"archived");
    }

    #[test]
    fn test_blocked_directory_surfaces_as_create_error() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("a.jpg");
        fs::write(&src, b"a").unwrap();
        // A plain file where the year directory should go.
        fs::write(tmp.path().join("2021"), b"not a dir").unwrap();
        let destination = tmp.path().join("2021/03-March/00001-a.jpg");

        let err = copy_with_mtime(&descriptor_for(src, SystemTime::now()), &destination)
            .unwrap_err();
        assert!(matches!(err, CopyError::Create { .. }));
        assert_eq!(err.stage(), CopyStage::Opened);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_stream_removes_partial_copy() {
        let tmp = tempdir().unwrap();
        // Opening a directory succeeds on Linux, reading it fails.
        let src = tmp.path().join("not-a-file");
        fs::create_dir(&src).unwrap();
        let destination = tmp.path().join("out/00001-not-a-file");

        let err = copy_with_mtime(&descriptor_for(src, SystemTime::now()), &destination)
            .unwrap_err();
        assert!(matches!(err, CopyError::Write { .. }));
        assert_eq!(err.stage(), CopyStage::Created);
        assert!(!destination.exists());
        assert!(destination.parent().unwrap().is_dir());
    }
}
