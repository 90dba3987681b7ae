//! Command orchestration layer.
//!
//! Each command brackets its work with `start` and `end`/`end_error` op
//! events carrying the run id and a duration.

pub mod collect;
pub mod discover;

pub use collect::{collect_snapshot, CollectReceipt};
pub use discover::{find_new_trending, DiscoveryOutcome};
