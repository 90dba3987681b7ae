//! Append-only writes.
//!
//! A collection run is written in one transaction: either every record of
//! the run is stored or none is.

use crate::errors::{from_rusqlite, Result};
use hubtrend_core::errors::{ExError, ExErrorKind};
use hubtrend_core::timestamp::to_storage;
use hubtrend_core::SnapshotRecord;
use rusqlite::{params, Connection, OptionalExtension};

/// Whether `repo_id` has been registered in this store.
pub fn repository_exists(conn: &Connection, repo_id: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM repositories WHERE repo_id = ?1",
            [repo_id],
            |_| Ok(()),
        )
        .optional()
        .map_err(from_rusqlite)?;
    Ok(found.is_some())
}

/// Register `repo_id` if it is not known yet. Returns `true` if it was new.
pub fn register_repository(conn: &Connection, repo_id: &str) -> Result<bool> {
    let inserted = conn
        .execute(
            "INSERT OR IGNORE INTO repositories (repo_id, registered_at) VALUES (?1, ?2)",
            params![repo_id, to_storage(&chrono::Utc::now())],
        )
        .map_err(from_rusqlite)?;
    Ok(inserted > 0)
}

fn counter(record: &SnapshotRecord, field: &str, value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("append_snapshot")
            .with_entity_id(record.id.as_str())
            .with_field(field)
            .with_message(format!("{} does not fit in a signed 64-bit column", value))
    })
}

/// Append records to the history of `repo_id`.
///
/// Registers the repository on first use. Returns the number of rows written.
///
/// # Errors
///
/// - `InvalidInput`: a counter exceeds `i64::MAX`
/// - `Serialization`: tags could not be encoded
/// - `Persistence`: SQLite write failed (nothing is written)
pub fn append_snapshot(
    conn: &mut Connection,
    repo_id: &str,
    records: &[SnapshotRecord],
) -> Result<usize> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    register_repository(&tx, repo_id)?;

    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO snapshot_records (
                    repo_id, kind, item_id, author, downloads, likes, tags,
                    last_modified, created_at, content_hash, collected_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            )
            .map_err(from_rusqlite)?;

        for record in records {
            let tags = serde_json::to_string(&record.tags).map_err(|e| {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("append_snapshot")
                    .with_entity_id(record.id.as_str())
                    .with_field("tags")
                    .with_message(e.to_string())
            })?;

            stmt.execute(params![
                repo_id,
                record.kind.as_str(),
                record.id,
                record.author,
                counter(record, "downloads", record.downloads)?,
                counter(record, "likes", record.likes)?,
                tags,
                to_storage(&record.last_modified),
                record.created_at.as_ref().map(to_storage),
                record.content_hash,
                to_storage(&record.collected_at),
            ])
            .map_err(from_rusqlite)?;
        }
    }

    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(repo_id, rows = records.len(), "appended snapshot records");
    Ok(records.len())
}
