//! Trending-delta engine.
//!
//! Finds items that entered the stored top-N ranking within the last `days`
//! after being absent from every earlier generation.
//!
//! ## Entry point
//!
//! ```ignore
//! use hubtrend_core::delta::compute_delta;
//!
//! let result = compute_delta(&history, &window)?;
//! let report = hubtrend_core::report::render_report(&result);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`truncate`]: keep the top-N records by downloads in each generation.
//! 2. [`partition`]: split at `cutoff = latest - days`, inclusive on the
//!    recent side.
//! 3. [`resolve`]: ids seen after the cutoff and never before it, each
//!    resolved to its latest record.
//! 4. [`recency`]: optionally drop items not modified recently.
//!
//! ## Guarantees
//!
//! - **Determinism**: identical history and window give identical output.
//! - **Strict novelty**: an id present in any generation before the cutoff is
//!   never reported, however often it reappears afterwards.
//! - **No mutation**: the input history is only borrowed.

pub mod engine;
pub mod partition;
pub mod recency;
pub mod resolve;
pub mod truncate;

pub use engine::compute_delta;
pub use partition::{cutoff_for, latest_collected_at, Partition};
pub use recency::{age_cutoff_for, age_in_days, filter_by_recency};
pub use resolve::resolve_new_items;
pub use truncate::truncate_top_n;
