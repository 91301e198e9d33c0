//! The sparse region annotation store.

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::error::DecodeError;

use super::paint::PaintAction;
use super::record::{RegionId, RegionRecord};
use super::selection::Selection;

/// Which part of the store a mutation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeScope {
    Region(RegionId),
    All,
}

/// Notification produced by every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub revision: u64,
    pub scope: ChangeScope,
}

/// Mapping of region id to annotation; the single source of truth.
///
/// Ids are never removed once present. The eraser clears a color but keeps
/// the record so its memo survives.
#[derive(Resource, Debug, Default)]
pub struct RegionStore {
    records: HashMap<RegionId, RegionRecord>,
    revision: u64,
}

impl RegionStore {
    /// Record for `id`, or the empty record if the region was never touched.
    pub fn record(&self, id: &RegionId) -> RegionRecord {
        self.records.get(id).cloned().unwrap_or_default()
    }

    pub fn set_color(&mut self, id: &RegionId, action: PaintAction) -> StoreChange {
        let record = self.records.entry(id.clone()).or_default();
        record.color = match action {
            PaintAction::SetColor(token) => Some(token),
            PaintAction::ClearColor => None,
        };
        self.bump(ChangeScope::Region(id.clone()))
    }

    /// Replace the memo of the selected region. Does nothing without a selection.
    pub fn set_memo(
        &mut self,
        selection: &Selection,
        text: impl Into<String>,
    ) -> Option<StoreChange> {
        let id = selection.id()?.clone();
        self.records.entry(id.clone()).or_default().memo = Some(text.into());
        Some(self.bump(ChangeScope::Region(id)))
    }

    /// Swap the whole mapping for `candidate` if it is a mapping of ids to
    /// record-shaped objects. On error the store is left untouched.
    pub fn replace_all(&mut self, candidate: serde_json::Value) -> Result<StoreChange, DecodeError> {
        let records: HashMap<RegionId, RegionRecord> = serde_json::from_value(candidate)?;
        self.records = records;
        Ok(self.bump(ChangeScope::All))
    }

    /// Identity of the current contents; bumps on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of ids holding a record, empty or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of regions carrying a color or a memo.
    pub fn annotated_count(&self) -> usize {
        self.records.values().filter(|r| !r.is_empty()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RegionId, &RegionRecord)> {
        self.records.iter()
    }

    /// Sorted view of every non-empty record, as written to disk.
    pub fn snapshot(&self) -> BTreeMap<&RegionId, &RegionRecord> {
        self.records
            .iter()
            .filter(|(_, record)| !record.is_empty())
            .collect()
    }

    /// Whether both stores describe the same annotations, ignoring empty records.
    pub fn same_contents(&self, other: &RegionStore) -> bool {
        self.snapshot() == other.snapshot()
    }

    fn bump(&mut self, scope: ChangeScope) -> StoreChange {
        self.revision += 1;
        StoreChange {
            revision: self.revision,
            scope,
        }
    }
}
