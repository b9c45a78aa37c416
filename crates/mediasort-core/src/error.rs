use crate::copier::CopyStage;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Usage error: {0}")]
    Usage(String),

    /// Stat, open or read failure while fingerprinting. Fatal under the
    /// default hash error policy since it would corrupt the dedup decision.
    #[error("Cannot fingerprint {}: {source}", path.display())]
    Fingerprint {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read walk entry under {}: {message}", root.display())]
    ScanEntry { root: PathBuf, message: String },
}

/// Per-file copy failure. The run continues with the next file.
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("Could not open {} for reading: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `reached` is `Opened` when the destination directory could not be
    /// created either.
    #[error("Could not open {} for writing: {source}", path.display())]
    Create {
        path: PathBuf,
        reached: CopyStage,
        #[source]
        source: io::Error,
    },

    #[error("Could not copy into {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    pub fn path(&self) -> &PathBuf {
        match self {
            CopyError::Open { path, .. }
            | CopyError::Create { path, .. }
            | CopyError::Write { path, .. } => path,
        }
    }

    /// Last step that completed before the copy was abandoned.
    pub fn stage(&self) -> CopyStage {
        match self {
            CopyError::Open { .. } => CopyStage::Pending,
            CopyError::Create { reached, .. } => *reached,
            CopyError::Write { .. } => CopyStage::Created,
        }
    }
}
