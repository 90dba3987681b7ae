//! Migration framework
//!
//! The store schema lives in `migrations/*.sql`, embedded at compile time
//! and applied idempotently on open.

mod runner;

pub use runner::{apply_migrations, applied_migrations};
