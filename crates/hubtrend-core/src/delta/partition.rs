//! Window partition around the cutoff instant.

use crate::errors::{Result, TrendError};
use crate::model::SnapshotRecord;
use chrono::{DateTime, Duration, Utc};

/// Latest `collected_at` across all given collections.
///
/// # Errors
///
/// `EmptyHistory` if every collection is empty.
pub fn latest_collected_at<'a, I>(collections: I) -> Result<DateTime<Utc>>
where
    I: IntoIterator<Item = &'a [SnapshotRecord]>,
{
    collections
        .into_iter()
        .flat_map(|records| records.iter().map(|r| r.collected_at))
        .max()
        .ok_or(TrendError::EmptyHistory)
}

/// `latest - days`, in whole 24-hour days.
///
/// A window reaching past the earliest representable instant saturates to
/// it, so every record falls on the recent side.
pub fn cutoff_for(latest: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    days_before(latest, i64::from(days))
}

pub(crate) fn days_before(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| instant.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Records split at the cutoff. Both halves keep input order.
#[derive(Debug, Clone, Default)]
pub struct Partition<'a> {
    /// `collected_at < cutoff`
    pub before: Vec<&'a SnapshotRecord>,
    /// `collected_at >= cutoff`
    pub after: Vec<&'a SnapshotRecord>,
}

impl<'a> Partition<'a> {
    pub fn split(records: &'a [SnapshotRecord], cutoff: DateTime<Utc>) -> Self {
        let (before, after): (Vec<&SnapshotRecord>, Vec<&SnapshotRecord>) =
            records.iter().partition(|record| record.collected_at < cutoff);
        Self { before, after }
    }
}
