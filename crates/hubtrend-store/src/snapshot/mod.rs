//! Snapshot persistence: append collection runs, load history.

pub mod append;
pub mod load;

pub use append::{append_snapshot, register_repository, repository_exists};
pub use load::{list_generations, load_history, GenerationSummary};
