//! Per-generation top-N truncation.

use crate::model::SnapshotRecord;
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Group records into generations keyed by `collected_at`.
///
/// Generations come out in ascending time order; records inside a generation
/// keep their input order.
pub fn group_generations(
    records: &[SnapshotRecord],
) -> BTreeMap<DateTime<Utc>, Vec<&SnapshotRecord>> {
    let mut generations: BTreeMap<DateTime<Utc>, Vec<&SnapshotRecord>> = BTreeMap::new();
    for record in records {
        generations
            .entry(record.collected_at)
            .or_default()
            .push(record);
    }
    generations
}

/// Keep the `cap` most-downloaded records of each generation.
///
/// Ranking within a generation is by `downloads` descending; equal download
/// counts keep their input order. With `cap == None` the records are returned
/// unchanged, in input order.
pub fn truncate_top_n(records: &[SnapshotRecord], cap: Option<usize>) -> Vec<SnapshotRecord> {
    let Some(cap) = cap else {
        return records.to_vec();
    };

    let mut kept = Vec::new();
    for (_, mut generation) in group_generations(records) {
        // sort_by_key is stable
        generation.sort_by_key(|record| Reverse(record.downloads));
        kept.extend(generation.into_iter().take(cap).cloned());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemKind;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn rec(id: &str, day: u32, downloads: u64) -> SnapshotRecord {
        SnapshotRecord::new(id, ItemKind::Model, at(day), at(day)).with_downloads(downloads)
    }

    fn ids(records: &[SnapshotRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_no_cap_is_identity() {
        let records = vec![rec("b", 2, 1), rec("a", 1, 5)];
        assert_eq!(truncate_top_n(&records, None), records);
    }

    #[test]
    fn test_cap_applies_per_generation() {
        let records = vec![
            rec("low", 1, 1),
            rec("high", 1, 100),
            rec("mid", 1, 50),
            rec("only", 2, 0),
        ];
        let kept = truncate_top_n(&records, Some(2));
        assert_eq!(ids(&kept), vec!["high", "mid", "only"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let records = vec![rec("first", 1, 10), rec("second", 1, 10), rec("third", 1, 10)];
        let kept = truncate_top_n(&records, Some(2));
        assert_eq!(ids(&kept), vec!["first", "second"]);
    }

    #[test]
    fn test_generations_emitted_oldest_first() {
        let records = vec![rec("late", 5, 1), rec("early", 1, 1)];
        let kept = truncate_top_n(&records, Some(10));
        assert_eq!(ids(&kept), vec!["early", "late"]);
    }

    #[test]
    fn test_group_generations_counts() {
        let records = vec![rec("a", 1, 1), rec("b", 1, 1), rec("c", 2, 1)];
        let generations = group_generations(&records);
        assert_eq!(generations.len(), 2);
        assert_eq!(generations[&at(1)].len(), 2);
    }
}
