//! hubtrend Store - append-only SQLite snapshot store
//!
//! Provides:
//! - Connection helpers and an embedded migration runner
//! - Appending collection runs for a repository
//! - Loading a repository's full history for the delta engine
//! - Per-generation summaries

pub mod db;
pub mod errors;
pub mod migrations;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use snapshot::{append_snapshot, list_generations, load_history, GenerationSummary};
