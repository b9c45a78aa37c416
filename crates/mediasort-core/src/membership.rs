use crate::hasher::Fingerprint;
use ahash::AHashSet;

/// Exact set of content fingerprints seen so far in a run: everything in the
/// destination archive plus every source file already accepted.
#[derive(Debug, Default)]
pub struct MembershipSet {
    seen: AHashSet<Fingerprint>,
}

impl MembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.seen.contains(fingerprint)
    }

    /// Returns `true` if the fingerprint was not present before.
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.seen.insert(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
