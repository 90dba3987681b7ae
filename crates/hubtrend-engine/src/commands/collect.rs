//! Recording a collection run.
//!
//! Both listings are mapped before anything is written, so a malformed item
//! leaves the store untouched. The run is then appended in one transaction.

use std::time::Instant;

use chrono::{DateTime, Utc};
use hubtrend_core::collect::{prepare_records, RegistryItem};
use hubtrend_core::errors::{ExError, TrendError};
use hubtrend_core::ItemKind;
use hubtrend_core_types::RequestContext;
use hubtrend_store::append_snapshot;
use hubtrend_store::errors::Result;
use rusqlite::Connection;
use serde::Serialize;

/// Receipt of a stored collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectReceipt {
    pub run_id: String,
    pub repo_id: String,
    pub collected_at: DateTime<Utc>,
    pub models_written: usize,
    pub datasets_written: usize,
}

impl CollectReceipt {
    pub fn total(&self) -> usize {
        self.models_written + self.datasets_written
    }
}

/// Append one generation of models and datasets, all stamped `collected_at`.
///
/// # Errors
///
/// - `MalformedRecord`: an item lacks an id or carries a bad timestamp
/// - `InvalidInput`: a counter does not fit the store
/// - `Persistence`: the write failed (nothing is written)
pub fn collect_snapshot(
    conn: &mut Connection,
    repo_id: &str,
    models: Vec<RegistryItem>,
    datasets: Vec<RegistryItem>,
    collected_at: DateTime<Utc>,
) -> Result<CollectReceipt> {
    let ctx = RequestContext::new(repo_id);
    let start = Instant::now();
    hubtrend_core::log_op_start!(
        "collect_snapshot",
        run_id = ctx.run_id.as_str(),
        repo_id = repo_id,
        models = models.len(),
        datasets = datasets.len()
    );

    match collect_snapshot_impl(conn, &ctx, models, datasets, collected_at) {
        Ok(receipt) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            hubtrend_core::log_op_end!(
                "collect_snapshot",
                duration_ms = duration_ms,
                run_id = ctx.run_id.as_str(),
                record_count = receipt.total()
            );
            Ok(receipt)
        }
        Err(e) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            hubtrend_core::log_op_error!(
                "collect_snapshot",
                e.clone(),
                duration_ms = duration_ms,
                run_id = ctx.run_id.as_str()
            );
            Err(e)
        }
    }
}

fn collect_snapshot_impl(
    conn: &mut Connection,
    ctx: &RequestContext,
    models: Vec<RegistryItem>,
    datasets: Vec<RegistryItem>,
    collected_at: DateTime<Utc>,
) -> Result<CollectReceipt> {
    let map_err = |e: TrendError| {
        ExError::from(e)
            .with_op("collect_snapshot")
            .with_run_id(ctx.run_id.clone())
    };

    let mut records = prepare_records(models, ItemKind::Model, collected_at).map_err(map_err)?;
    let models_written = records.len();
    records.extend(prepare_records(datasets, ItemKind::Dataset, collected_at).map_err(map_err)?);
    let datasets_written = records.len() - models_written;

    append_snapshot(conn, &ctx.repo_id, &records)
        .map_err(|e| e.with_run_id(ctx.run_id.clone()))?;

    Ok(CollectReceipt {
        run_id: ctx.run_id.to_string(),
        repo_id: ctx.repo_id.clone(),
        collected_at,
        models_written,
        datasets_written,
    })
}
