//! Optional recency-by-modification filter.

use crate::delta::partition::days_before;
use crate::model::SnapshotRecord;
use chrono::{DateTime, Utc};

/// A month is counted as exactly 30 days.
pub const DAYS_PER_MONTH: i64 = 30;

/// `latest - 30 * months` days, saturating at the earliest representable
/// instant.
pub fn age_cutoff_for(latest: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    days_before(latest, DAYS_PER_MONTH * i64::from(months))
}

/// Whole days between `last_modified` and `latest`, truncated toward zero.
/// Negative when the registry reports a modification after `latest`.
pub fn age_in_days(latest: DateTime<Utc>, last_modified: DateTime<Utc>) -> i64 {
    (latest - last_modified).num_days()
}

/// Keep records modified at or after the age cutoff.
///
/// `months` of `None` or `Some(0)` disables the filter. The output is always
/// an order-preserving subset of the input.
pub fn filter_by_recency(
    records: Vec<SnapshotRecord>,
    latest: DateTime<Utc>,
    months: Option<u32>,
) -> Vec<SnapshotRecord> {
    match months.filter(|m| *m > 0) {
        None => records,
        Some(months) => {
            let age_cutoff = age_cutoff_for(latest, months);
            records
                .into_iter()
                .filter(|record| record.last_modified >= age_cutoff)
                .collect()
        }
    }
}
