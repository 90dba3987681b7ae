//! New-item resolution: the temporal set difference.

use crate::delta::partition::Partition;
use crate::model::SnapshotRecord;
use std::collections::{HashMap, HashSet};

/// Ids present after the cutoff and absent from every record before it,
/// each resolved to one representative record.
///
/// The representative is the record with the greatest `collected_at` among
/// the id's `after` records; on equal timestamps the earliest in input order
/// wins. Output is ordered by `collected_at` descending, then id ascending.
pub fn resolve_new_items(partition: &Partition<'_>) -> Vec<SnapshotRecord> {
    let before_ids: HashSet<&str> = partition.before.iter().map(|r| r.id.as_str()).collect();

    let mut representatives: HashMap<&str, &SnapshotRecord> = HashMap::new();
    for &record in &partition.after {
        if before_ids.contains(record.id.as_str()) {
            continue;
        }
        representatives
            .entry(record.id.as_str())
            .and_modify(|current| {
                if record.collected_at > current.collected_at {
                    *current = record;
                }
            })
            .or_insert(record);
    }

    let mut resolved: Vec<SnapshotRecord> = representatives.into_values().cloned().collect();
    resolved.sort_by(|a, b| {
        b.collected_at
            .cmp(&a.collected_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    resolved
}
