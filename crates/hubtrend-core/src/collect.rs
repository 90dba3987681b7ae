//! Mapping of raw registry listings into snapshot records.
//!
//! The registry reports items with several optional attributes. Each one is
//! an explicit `Option` here, with these defaults when absent:
//!
//! | attribute      | default             |
//! |----------------|---------------------|
//! | `downloads`    | 0                   |
//! | `likes`        | 0                   |
//! | `tags`         | empty               |
//! | `sha`          | empty `content_hash`|
//! | `createdAt`    | `None`              |
//!
//! `id` (or `modelId`) and `lastModified` are required.

use crate::errors::{Result, TrendError};
use crate::model::{author_of, ItemKind, SnapshotRecord};
use crate::timestamp::parse_utc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a registry list response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    #[serde(default)]
    pub id: Option<String>,
    /// Legacy model identifier; preferred over `id` for models
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub downloads: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub sha: Option<String>,
}

impl RegistryItem {
    fn resolved_id(&self, kind: ItemKind) -> Option<&str> {
        let (first, second) = match kind {
            ItemKind::Model => (&self.model_id, &self.id),
            ItemKind::Dataset => (&self.id, &self.model_id),
        };
        first
            .as_deref()
            .or(second.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Convert into a record of `kind`, stamped with `collected_at`.
    ///
    /// # Errors
    ///
    /// `MalformedRecord` if the id or `lastModified` is missing, or if a
    /// timestamp cannot be parsed.
    pub fn into_record(self, kind: ItemKind, collected_at: DateTime<Utc>) -> Result<SnapshotRecord> {
        let id = self
            .resolved_id(kind)
            .map(str::to_string)
            .ok_or_else(|| TrendError::malformed("<unknown>", "id", "is missing"))?;

        let raw_modified = self
            .last_modified
            .as_deref()
            .ok_or_else(|| TrendError::malformed(&id, "last_modified", "is missing"))?;
        let last_modified = parse_utc(raw_modified).ok_or_else(|| {
            TrendError::malformed(
                &id,
                "last_modified",
                format!("is not a timestamp: {:?}", raw_modified),
            )
        })?;

        let created_at = match self.created_at.as_deref() {
            None => None,
            Some(raw) => Some(parse_utc(raw).ok_or_else(|| {
                TrendError::malformed(&id, "created_at", format!("is not a timestamp: {:?}", raw))
            })?),
        };

        Ok(SnapshotRecord {
            author: author_of(&id),
            id,
            kind,
            downloads: self.downloads.unwrap_or(0),
            likes: self.likes.unwrap_or(0),
            tags: self.tags.unwrap_or_default(),
            last_modified,
            created_at,
            content_hash: self.sha.unwrap_or_default(),
            collected_at,
        })
    }
}

/// Parse a JSON array of registry items.
///
/// # Errors
///
/// `Serialization` if the text is not a JSON array of objects.
pub fn parse_listing(json: &str) -> Result<Vec<RegistryItem>> {
    Ok(serde_json::from_str(json)?)
}

/// Map a whole listing to records of one kind, all sharing `collected_at`.
///
/// Fails on the first malformed item; nothing is partially returned.
pub fn prepare_records(
    items: Vec<RegistryItem>,
    kind: ItemKind,
    collected_at: DateTime<Utc>,
) -> Result<Vec<SnapshotRecord>> {
    items
        .into_iter()
        .map(|item| item.into_record(kind, collected_at))
        .collect()
}
