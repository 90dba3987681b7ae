use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which registry collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Model,
    Dataset,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::Model, ItemKind::Dataset];

    /// Stored form (`"model"` / `"dataset"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Model => "model",
            ItemKind::Dataset => "dataset",
        }
    }

    /// Name of the collection holding this kind (`"models"` / `"datasets"`)
    pub fn collection(&self) -> &'static str {
        match self {
            ItemKind::Model => "models",
            ItemKind::Dataset => "datasets",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "model" => Some(ItemKind::Model),
            "dataset" => Some(ItemKind::Dataset),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace part of a registry id: everything before the first `/`, or
/// empty for un-namespaced ids.
pub fn author_of(id: &str) -> String {
    id.split_once('/')
        .map(|(author, _)| author.to_string())
        .unwrap_or_default()
}

/// One observation of one item in one collection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: String,
    pub kind: ItemKind,
    pub author: String,
    pub downloads: u64,
    pub likes: u64,
    pub tags: Vec<String>,
    pub last_modified: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
    /// Registry revision marker; empty when the registry reported none
    pub content_hash: String,
    pub collected_at: DateTime<Utc>,
}

impl SnapshotRecord {
    /// Create a record with zero counters, no tags and no creation time.
    /// `author` is derived from `id`.
    pub fn new(
        id: impl Into<String>,
        kind: ItemKind,
        last_modified: DateTime<Utc>,
        collected_at: DateTime<Utc>,
    ) -> Self {
        let id = id.into();
        Self {
            author: author_of(&id),
            id,
            kind,
            downloads: 0,
            likes: 0,
            tags: Vec::new(),
            last_modified,
            created_at: None,
            content_hash: String::new(),
            collected_at,
        }
    }

    pub fn with_downloads(mut self, downloads: u64) -> Self {
        self.downloads = downloads;
        self
    }

    pub fn with_likes(mut self, likes: u64) -> Self {
        self.likes = likes;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_content_hash(mut self, content_hash: impl Into<String>) -> Self {
        self.content_hash = content_hash.into();
        self
    }
}

/// The full stored history of one repository, as handed to the engine.
///
/// Both collections keep store insertion order; tie-breaks in the engine
/// depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    pub models: Vec<SnapshotRecord>,
    pub datasets: Vec<SnapshotRecord>,
}

impl History {
    pub fn new(models: Vec<SnapshotRecord>, datasets: Vec<SnapshotRecord>) -> Self {
        Self { models, datasets }
    }

    /// Split a mixed sequence by kind, preserving relative order.
    pub fn from_records(records: impl IntoIterator<Item = SnapshotRecord>) -> Self {
        let mut history = Self::default();
        for record in records {
            history.push(record);
        }
        history
    }

    pub fn push(&mut self, record: SnapshotRecord) {
        match record.kind {
            ItemKind::Model => self.models.push(record),
            ItemKind::Dataset => self.datasets.push(record),
        }
    }

    pub fn records(&self, kind: ItemKind) -> &[SnapshotRecord] {
        match kind {
            ItemKind::Model => &self.models,
            ItemKind::Dataset => &self.datasets,
        }
    }

    pub fn len(&self) -> usize {
        self.models.len() + self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty() && self.datasets.is_empty()
    }
}
