//! Delta computation entry point.
//!
//! [`compute_delta`] runs the whole pipeline over a loaded [`History`] and
//! returns a [`DeltaResult`]. It is a pure function of its inputs.

use crate::delta::partition::{cutoff_for, latest_collected_at, Partition};
use crate::delta::recency::filter_by_recency;
use crate::delta::resolve::resolve_new_items;
use crate::delta::truncate::{group_generations, truncate_top_n};
use crate::errors::Result;
use crate::model::{DeltaResult, DeltaWindow, History, ItemKind, SnapshotRecord};
use chrono::{DateTime, Utc};

/// Compute the newly trending models and datasets.
///
/// Both collections share one `latest` (the most recent generation of either
/// kind, after truncation) and therefore one cutoff.
///
/// # Errors
///
/// - `EmptyHistory`: no records survive truncation in either collection
pub fn compute_delta(history: &History, window: &DeltaWindow) -> Result<DeltaResult> {
    let cap = window.top_n_per_generation();
    let models = truncate_top_n(&history.models, cap);
    let datasets = truncate_top_n(&history.datasets, cap);

    tracing::debug!(
        model_records = history.models.len(),
        model_records_kept = models.len(),
        dataset_records = history.datasets.len(),
        dataset_records_kept = datasets.len(),
        top_n = ?cap,
        "truncated generations"
    );

    let latest = latest_collected_at([models.as_slice(), datasets.as_slice()])?;
    let cutoff = cutoff_for(latest, window.days());

    tracing::info!(
        latest = %latest,
        cutoff = %cutoff,
        days = window.days(),
        "looking for items absent before cutoff"
    );

    let new_models = new_items(ItemKind::Model, &models, latest, cutoff, window);
    let new_datasets = new_items(ItemKind::Dataset, &datasets, latest, cutoff, window);

    Ok(DeltaResult {
        window: *window,
        latest,
        cutoff,
        new_models_count: new_models.len(),
        new_datasets_count: new_datasets.len(),
        models: new_models,
        datasets: new_datasets,
    })
}

fn new_items(
    kind: ItemKind,
    records: &[SnapshotRecord],
    latest: DateTime<Utc>,
    cutoff: DateTime<Utc>,
    window: &DeltaWindow,
) -> Vec<SnapshotRecord> {
    let partition = Partition::split(records, cutoff);
    let resolved = resolve_new_items(&partition);
    let resolved_count = resolved.len();
    let kept = filter_by_recency(resolved, latest, window.recency_months());

    tracing::debug!(
        kind = kind.as_str(),
        generations = group_generations(records).len(),
        before = partition.before.len(),
        after = partition.after.len(),
        resolved = resolved_count,
        kept = kept.len(),
        "resolved new items"
    );

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrendError;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn model(id: &str, day: u32) -> SnapshotRecord {
        SnapshotRecord::new(id, ItemKind::Model, at(day), at(day))
    }

    fn dataset(id: &str, day: u32) -> SnapshotRecord {
        SnapshotRecord::new(id, ItemKind::Dataset, at(day), at(day))
    }

    fn ids(records: &[SnapshotRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_empty_history_is_an_error() {
        let err = compute_delta(&History::default(), &DeltaWindow::default()).unwrap_err();
        assert_eq!(err, TrendError::EmptyHistory);
    }

    #[test]
    fn test_collections_share_latest() {
        // models stop on day 2, datasets continue to day 10
        let history = History::new(
            vec![model("m-old", 1), model("m-new", 2)],
            vec![dataset("d", 10)],
        );
        let window = DeltaWindow::new(7).unwrap();
        let result = compute_delta(&history, &window).unwrap();
        assert_eq!(result.latest, at(10));
        assert_eq!(result.cutoff, at(3));
        assert!(result.models.is_empty());
        assert_eq!(ids(&result.datasets), vec!["d"]);
    }

    #[test]
    fn test_counts_match_sequences() {
        let history = History::new(
            vec![model("a", 1), model("b", 8), model("c", 8)],
            vec![dataset("x", 8)],
        );
        let result = compute_delta(&history, &DeltaWindow::new(3).unwrap()).unwrap();
        assert_eq!(result.new_models_count, result.models.len());
        assert_eq!(result.new_datasets_count, result.datasets.len());
        assert_eq!(result.total(), 3);
    }
}
