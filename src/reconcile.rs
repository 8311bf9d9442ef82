use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::HashSet;

use crate::Record;

#[cfg(feature = "std")]
type IdSet = HashSet<String>;
#[cfg(not(feature = "std"))]
type IdSet = BTreeSet<String>;

/// Merges a fetched batch into the existing ordered list without duplicates.
///
/// Elements of `incoming` whose id already appears in `existing` are dropped;
/// the rest are appended in `incoming`'s internal order. `existing` is never
/// reordered. Repeated or overlapping batches are therefore idempotent.
///
/// Returns the number of records actually appended.
pub fn merge(existing: &mut Vec<Record>, incoming: Vec<Record>) -> usize {
    if existing.is_empty() {
        let appended = incoming.len();
        *existing = incoming;
        return appended;
    }

    let seen: IdSet = existing.iter().map(|r| r.id.clone()).collect();
    let before = existing.len();
    existing.extend(incoming.into_iter().filter(|r| !seen.contains(&r.id)));
    let appended = existing.len() - before;
    pftrace!(appended, total = existing.len(), "merge");
    appended
}
