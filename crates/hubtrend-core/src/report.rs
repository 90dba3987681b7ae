//! Plain-text report renderer for delta results.

use crate::delta::recency::age_in_days;
use crate::model::{DeltaResult, ItemKind, SnapshotRecord};
use crate::timestamp::to_display;

/// Render the human-readable report for a [`DeltaResult`].
///
/// One section per collection. When the window carries a recency bound each
/// line also shows how many whole days before `latest` the item was modified.
pub fn render_report(result: &DeltaResult) -> String {
    let mut out = String::new();

    for (index, kind) in ItemKind::ALL.into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_section(&mut out, result, kind);
    }

    out
}

fn render_section(out: &mut String, result: &DeltaResult, kind: ItemKind) {
    let title = match kind {
        ItemKind::Model => "Models",
        ItemKind::Dataset => "Datasets",
    };
    let noun = kind.collection();

    out.push_str(&format!(
        "=== New Trending {} (first appeared in last {} days) ===\n",
        title,
        result.window.days()
    ));

    let records = result.records(kind);
    if records.is_empty() {
        out.push_str(&format!("No new trending {} found.\n", noun));
        return;
    }

    let show_age = result.window.recency_months().is_some();
    for record in records {
        out.push_str(&render_line(record, result, show_age));
        out.push('\n');
    }
    out.push_str(&format!("\nTotal new {}: {}\n", noun, result.count(kind)));
}

fn render_line(record: &SnapshotRecord, result: &DeltaResult, show_age: bool) -> String {
    let collected = to_display(&record.collected_at);
    if show_age {
        format!(
            "{}: {} (Modified {}d ago, Downloads: {}, Likes: {})",
            collected,
            record.id,
            age_in_days(result.latest, record.last_modified),
            record.downloads,
            record.likes
        )
    } else {
        format!(
            "{}: {} (Downloads: {}, Likes: {})",
            collected, record.id, record.downloads, record.likes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeltaWindow;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn latest() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
    }

    fn result_with(window: DeltaWindow, models: Vec<SnapshotRecord>) -> DeltaResult {
        DeltaResult {
            window,
            latest: latest(),
            cutoff: latest() - Duration::days(i64::from(window.days())),
            new_models_count: models.len(),
            new_datasets_count: 0,
            models,
            datasets: Vec::new(),
        }
    }

    #[test]
    fn test_plain_report() {
        let record = SnapshotRecord::new(
            "org/model",
            ItemKind::Model,
            latest() - Duration::days(3),
            latest(),
        )
        .with_downloads(1200)
        .with_likes(45);
        let report = render_report(&result_with(DeltaWindow::default(), vec![record]));

        let expected = "\
=== New Trending Models (first appeared in last 7 days) ===
2024-01-08 00:00:00+00:00: org/model (Downloads: 1200, Likes: 45)

Total new models: 1

=== New Trending Datasets (first appeared in last 7 days) ===
No new trending datasets found.
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_recency_report_shows_age() {
        let record = SnapshotRecord::new(
            "org/model",
            ItemKind::Model,
            latest() - Duration::days(12),
            latest(),
        );
        let window = DeltaWindow::new(7).unwrap().with_max_age_months(1);
        let report = render_report(&result_with(window, vec![record]));
        assert!(report.contains(
            "2024-01-08 00:00:00+00:00: org/model (Modified 12d ago, Downloads: 0, Likes: 0)"
        ));
    }

    #[test]
    fn test_zero_month_window_renders_plain_lines() {
        let record = SnapshotRecord::new("m", ItemKind::Model, latest(), latest());
        let window = DeltaWindow::new(7).unwrap().with_max_age_months(0);
        let report = render_report(&result_with(window, vec![record]));
        assert!(!report.contains("Modified"));
    }
}
