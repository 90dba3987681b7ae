//! hubtrend Core - trending-delta engine over registry snapshots
//!
//! This crate provides the in-memory half of hubtrend:
//! - Snapshot record, window and result models
//! - The delta engine (top-N truncation, window partition, new-item
//!   resolution, recency filter)
//! - Plain-text report rendering
//! - Mapping of raw registry listings into snapshot records
//! - The error and logging facilities shared by every other crate
//!
//! Nothing here performs I/O; loading and persisting snapshots lives in
//! `hubtrend-store`.

pub mod collect;
pub mod delta;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod report;
pub mod timestamp;

// Re-export commonly used types
pub use delta::compute_delta;
pub use errors::{ExError, ExErrorKind, Result, TrendError};
pub use model::{DeltaResult, DeltaWindow, History, ItemKind, SnapshotRecord};
pub use report::render_report;
