use std::collections::HashSet;

use fc_core::hash::{fingerprint, Fingerprint};

/// First-seen filter over normalized rules.
///
/// Holds one fingerprint per accepted rule for the lifetime of a run. The set
/// only grows.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<Fingerprint>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `rule` and returns true if it had not been seen before.
    pub fn insert(&mut self, rule: &str) -> bool {
        self.seen.insert(fingerprint(rule))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
