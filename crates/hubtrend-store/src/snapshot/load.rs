//! Read-only history queries.
//!
//! Rows are coerced into [`SnapshotRecord`]s here, before they reach the
//! engine. Nothing is defaulted silently: a row that cannot be coerced fails
//! the whole load with `MalformedRecord`.

use crate::errors::{store_unavailable, Result};
use crate::snapshot::append::repository_exists;
use chrono::{DateTime, Utc};
use hubtrend_core::errors::{ExError, TrendError};
use hubtrend_core::model::author_of;
use hubtrend_core::timestamp::parse_utc;
use hubtrend_core::{History, ItemKind, SnapshotRecord};
use rusqlite::{Connection, Row};
use std::collections::BTreeMap;

/// A row of `snapshot_records` exactly as stored.
#[derive(Debug, Clone)]
struct StoredRow {
    item_id: String,
    kind: String,
    author: Option<String>,
    downloads: i64,
    likes: i64,
    tags: String,
    last_modified: Option<String>,
    created_at: Option<String>,
    content_hash: String,
    collected_at: Option<String>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            item_id: row.get(0)?,
            kind: row.get(1)?,
            author: row.get(2)?,
            downloads: row.get(3)?,
            likes: row.get(4)?,
            tags: row.get(5)?,
            last_modified: row.get(6)?,
            created_at: row.get(7)?,
            content_hash: row.get(8)?,
            collected_at: row.get(9)?,
        })
    }

    fn into_record(self) -> std::result::Result<SnapshotRecord, TrendError> {
        let id = self.item_id;

        let kind = ItemKind::parse(&self.kind).ok_or_else(|| {
            TrendError::malformed(&id, "kind", format!("unknown kind {:?}", self.kind))
        })?;

        let downloads = non_negative(&id, "downloads", self.downloads)?;
        let likes = non_negative(&id, "likes", self.likes)?;

        let tags: Vec<String> = serde_json::from_str(&self.tags).map_err(|e| {
            TrendError::malformed(&id, "tags", format!("is not a JSON array of strings: {}", e))
        })?;

        let last_modified = required_timestamp(&id, "last_modified", self.last_modified)?;
        let collected_at = required_timestamp(&id, "collected_at", self.collected_at)?;
        let created_at = match self.created_at {
            None => None,
            Some(raw) => Some(parse_utc(&raw).ok_or_else(|| {
                TrendError::malformed(&id, "created_at", format!("is not a timestamp: {:?}", raw))
            })?),
        };

        Ok(SnapshotRecord {
            author: self.author.unwrap_or_else(|| author_of(&id)),
            id,
            kind,
            downloads,
            likes,
            tags,
            last_modified,
            created_at,
            content_hash: self.content_hash,
            collected_at,
        })
    }
}

fn non_negative(id: &str, field: &str, value: i64) -> std::result::Result<u64, TrendError> {
    u64::try_from(value)
        .map_err(|_| TrendError::malformed(id, field, format!("is negative: {}", value)))
}

fn required_timestamp(
    id: &str,
    field: &str,
    raw: Option<String>,
) -> std::result::Result<DateTime<Utc>, TrendError> {
    let raw = raw.ok_or_else(|| TrendError::malformed(id, field, "is missing"))?;
    parse_utc(&raw)
        .ok_or_else(|| TrendError::malformed(id, field, format!("is not a timestamp: {:?}", raw)))
}

fn query_rows(conn: &Connection, repo_id: &str) -> rusqlite::Result<Vec<StoredRow>> {
    let mut stmt = conn.prepare(
        "SELECT item_id, kind, author, downloads, likes, tags,
                last_modified, created_at, content_hash, collected_at
         FROM snapshot_records
         WHERE repo_id = ?1
         ORDER BY seq",
    )?;
    let rows = stmt
        .query_map([repo_id], StoredRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Load the full history of `repo_id`, both collections in insertion order.
///
/// # Errors
///
/// - `StoreUnavailable`: the repository is unknown or the query failed
/// - `MalformedRecord`: a stored row cannot be coerced into a record
pub fn load_history(conn: &Connection, repo_id: &str) -> Result<History> {
    let known = repository_exists(conn, repo_id)
        .map_err(|e| store_unavailable(repo_id, "store could not be queried").with_source(e))?;
    if !known {
        return Err(store_unavailable(repo_id, "repository not found in store"));
    }

    let rows = query_rows(conn, repo_id)
        .map_err(|e| store_unavailable(repo_id, e.to_string()))?;

    let mut history = History::default();
    for row in rows {
        let record = row
            .into_record()
            .map_err(|e| ExError::from(e).with_op("load_history"))?;
        history.push(record);
    }

    tracing::debug!(
        repo_id,
        models = history.models.len(),
        datasets = history.datasets.len(),
        "loaded history"
    );
    Ok(history)
}

/// One stored generation of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub collected_at: DateTime<Utc>,
    pub kind: ItemKind,
    pub record_count: usize,
}

/// Record counts per `(collected_at, kind)`, oldest generation first.
///
/// # Errors
///
/// Same as [`load_history`].
pub fn list_generations(conn: &Connection, repo_id: &str) -> Result<Vec<GenerationSummary>> {
    let history = load_history(conn, repo_id)?;

    let mut counts: BTreeMap<(DateTime<Utc>, ItemKind), usize> = BTreeMap::new();
    for record in history.models.iter().chain(history.datasets.iter()) {
        *counts.entry((record.collected_at, record.kind)).or_default() += 1;
    }

    Ok(counts
        .into_iter()
        .map(|((collected_at, kind), record_count)| GenerationSummary {
            collected_at,
            kind,
            record_count,
        })
        .collect())
}
