use crate::model::record::{ItemKind, SnapshotRecord};
use crate::model::window::DeltaWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Newly trending items found by one delta computation.
///
/// Each sequence is ordered by `collected_at` descending and holds at most
/// one record per id. An empty result means "no new items", never "no
/// history": the latter is an `EmptyHistory` error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaResult {
    pub window: DeltaWindow,
    /// Latest `collected_at` across both collections after truncation
    pub latest: DateTime<Utc>,
    /// `latest - days`; records at exactly this instant count as recent
    pub cutoff: DateTime<Utc>,
    pub models: Vec<SnapshotRecord>,
    pub datasets: Vec<SnapshotRecord>,
    pub new_models_count: usize,
    pub new_datasets_count: usize,
}

impl DeltaResult {
    pub fn records(&self, kind: ItemKind) -> &[SnapshotRecord] {
        match kind {
            ItemKind::Model => &self.models,
            ItemKind::Dataset => &self.datasets,
        }
    }

    pub fn count(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Model => self.new_models_count,
            ItemKind::Dataset => self.new_datasets_count,
        }
    }

    pub fn total(&self) -> usize {
        self.new_models_count + self.new_datasets_count
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
