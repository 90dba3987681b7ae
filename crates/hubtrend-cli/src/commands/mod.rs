pub mod collect;
pub mod discover;
pub mod history;

use hubtrend_store::errors::store_unavailable;
use rusqlite::Connection;
use std::path::Path;

pub const DEFAULT_REPO: &str = "reach-vb/trending-repos";
pub const DEFAULT_DB: &str = ".hubtrend/store.db";

/// Open an existing store for reading. A missing file is not created and an
/// existing one is never migrated.
pub fn open_existing(db: &str, repo_id: &str) -> hubtrend_store::Result<Connection> {
    if !Path::new(db).exists() {
        return Err(store_unavailable(
            repo_id,
            format!("no snapshot store at {}", db),
        ));
    }
    hubtrend_store::db::open_for_read(db)
}
