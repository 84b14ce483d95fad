//! Exact-key deduplication of inventory records.

use apimap_core::types::collections::FxHashSet;

use crate::record::{ApiRecord, DedupKey};

/// Drop records whose `(origin, method, path, source_file, source_line)`
/// key was already seen. Order is preserved and the first record wins, so
/// when two detectors hit the same line the earlier detector keeps its label.
///
/// Returns the number of records removed.
pub fn dedup_records(records: &mut Vec<ApiRecord>) -> usize {
    let before = records.len();
    let mut seen: FxHashSet<DedupKey> = FxHashSet::default();
    seen.reserve(before);
    records.retain(|record| seen.insert(record.dedup_key()));
    before - records.len()
}
