use crate::config::HashErrorPolicy;
use crate::descriptor::FileDescriptor;
use crate::error::Error;
use crate::membership::MembershipSet;
use crate::progress::ProgressReporter;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use super::walk::list_files;

#[derive(Debug, Default)]
pub struct DestinationIndex {
    pub files_indexed: usize,
    pub unreadable: usize,
}

#[derive(Debug, Default)]
pub struct SourceScan {
    /// Source files with unseen content, in discovery order.
    pub accepted: Vec<FileDescriptor>,
    pub files_seen: usize,
    pub duplicates: usize,
    pub unreadable: usize,
}

/// Fingerprints every file already in the archive into `seen`.
pub fn index_destination(
    dest_root: &Path,
    seen: &mut MembershipSet,
    policy: HashErrorPolicy,
    reporter: &dyn ProgressReporter,
) -> Result<DestinationIndex, Error> {
    let paths = list_files(dest_root);
    let (descriptors, unreadable) = describe_files(&paths, policy, reporter)?;

    let files_indexed = descriptors.len();
    for descriptor in descriptors {
        seen.insert(descriptor.fingerprint);
    }
    debug!(
        "{} archive files indexed, {} distinct contents",
        files_indexed,
        seen.len()
    );

    Ok(DestinationIndex {
        files_indexed,
        unreadable,
    })
}

/// Scans the source tree and keeps the files whose content is not in `seen`.
/// Accepted content is inserted as it is found, so the first of several
/// identical source files (in discovery order) wins.
pub fn collect_new(
    source_root: &Path,
    seen: &mut MembershipSet,
    policy: HashErrorPolicy,
    reporter: &dyn ProgressReporter,
) -> Result<SourceScan, Error> {
    let paths = list_files(source_root);
    for path in &paths {
        info!("Found: {}", path.display());
        reporter.on_file_found(&path.to_string_lossy());
    }
    let (descriptors, unreadable) = describe_files(&paths, policy, reporter)?;

    let mut scan = SourceScan {
        files_seen: descriptors.len(),
        unreadable,
        ..Default::default()
    };

    for descriptor in descriptors {
        if seen.insert(descriptor.fingerprint) {
            scan.accepted.push(descriptor);
        } else {
            debug!(
                "Skipping {}, content {} already archived",
                descriptor.source_path.display(),
                descriptor.fingerprint
            );
            scan.duplicates += 1;
        }
    }

    Ok(scan)
}

/// Builds descriptors on the rayon pool. Results come back in the order of
/// `paths` regardless of which thread hashed them.
fn describe_files(
    paths: &[PathBuf],
    policy: HashErrorPolicy,
    reporter: &dyn ProgressReporter,
) -> Result<(Vec<FileDescriptor>, usize), Error> {
    reporter.on_hash_start(paths.len());

    let describe = |path: &PathBuf| {
        let result = FileDescriptor::from_path(path);
        reporter.on_file_hashed();
        result
    };

    match policy {
        HashErrorPolicy::Abort => {
            let descriptors = paths
                .par_iter()
                .map(describe)
                .collect::<Result<Vec<_>, Error>>()?;
            Ok((descriptors, 0))
        }
        HashErrorPolicy::Skip => {
            let results: Vec<Result<FileDescriptor, Error>> =
                paths.par_iter().map(describe).collect();
            let mut descriptors = Vec::with_capacity(results.len());
            let mut unreadable = 0;
            for result in results {
                match result {
                    Ok(descriptor) => descriptors.push(descriptor),
                    Err(err) => {
                        error!("{}, skipping", err);
                        unreadable += 1;
                    }
                }
            }
            Ok((descriptors, unreadable))
        }
    }
}
