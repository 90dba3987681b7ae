//! Discovery of newly trending items.
//!
//! ## Pipeline
//! 1. Load the full history of the repository (`StoreUnavailable`,
//!    `MalformedRecord`)
//! 2. Compute the delta (`EmptyHistory`)
//! 3. Render the text report

use std::time::Instant;

use hubtrend_core::errors::ExError;
use hubtrend_core::{compute_delta, render_report, DeltaResult, DeltaWindow};
use hubtrend_core_types::RequestContext;
use hubtrend_store::errors::Result;
use hubtrend_store::load_history;
use rusqlite::Connection;
use serde::Serialize;

/// What one discovery run produced.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryOutcome {
    pub run_id: String,
    pub result: DeltaResult,
    /// Plain-text rendering of `result`
    #[serde(skip)]
    pub report: String,
}

/// Find the models and datasets that first appeared within `window`.
///
/// # Errors
///
/// - `StoreUnavailable`: the repository is unknown or cannot be read
/// - `MalformedRecord`: a stored row cannot be coerced
/// - `EmptyHistory`: the repository holds no records
pub fn find_new_trending(
    conn: &Connection,
    repo_id: &str,
    window: &DeltaWindow,
) -> Result<DiscoveryOutcome> {
    let ctx = RequestContext::new(repo_id);
    let start = Instant::now();
    hubtrend_core::log_op_start!(
        "find_new_trending",
        run_id = ctx.run_id.as_str(),
        repo_id = repo_id,
        days = window.days()
    );

    match find_new_trending_impl(conn, &ctx, window) {
        Ok(outcome) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            hubtrend_core::log_op_end!(
                "find_new_trending",
                duration_ms = duration_ms,
                run_id = ctx.run_id.as_str(),
                new_models = outcome.result.new_models_count,
                new_datasets = outcome.result.new_datasets_count
            );
            Ok(outcome)
        }
        Err(e) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            hubtrend_core::log_op_error!(
                "find_new_trending",
                e.clone(),
                duration_ms = duration_ms,
                run_id = ctx.run_id.as_str()
            );
            Err(e)
        }
    }
}

fn find_new_trending_impl(
    conn: &Connection,
    ctx: &RequestContext,
    window: &DeltaWindow,
) -> Result<DiscoveryOutcome> {
    let history =
        load_history(conn, &ctx.repo_id).map_err(|e| e.with_run_id(ctx.run_id.clone()))?;

    let result = compute_delta(&history, window).map_err(|e| {
        ExError::from(e)
            .with_entity_id(ctx.repo_id.as_str())
            .with_run_id(ctx.run_id.clone())
    })?;

    let report = render_report(&result);

    Ok(DiscoveryOutcome {
        run_id: ctx.run_id.to_string(),
        result,
        report,
    })
}
