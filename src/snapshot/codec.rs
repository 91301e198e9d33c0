//! Portable encoding of the whole store for user-initiated backup and restore.

use crate::error::{DecodeError, SnapshotError};
use crate::regions::{RegionStore, StoreChange};

/// What an import replaced the store with
#[derive(Debug)]
pub struct ImportSummary {
    /// Ids now present in the store
    pub records: usize,
    /// Ids with a color or memo
    pub annotated: usize,
    pub change: StoreChange,
}

/// Pretty-printed (2-space) JSON of every non-empty record, keys sorted.
pub fn export_snapshot(store: &RegionStore) -> Result<Vec<u8>, SnapshotError> {
    Ok(serde_json::to_vec_pretty(&store.snapshot())?)
}

/// Decode `bytes` and atomically replace the store with the result.
///
/// The payload must be a JSON object of region ids to record-shaped objects;
/// unknown record fields are ignored. On any error the store is untouched.
pub fn import_snapshot(store: &mut RegionStore, bytes: &[u8]) -> Result<ImportSummary, DecodeError> {
    let candidate: serde_json::Value = serde_json::from_slice(bytes)?;
    let change = store.replace_all(candidate)?;
    Ok(ImportSummary {
        records: store.len(),
        annotated: store.annotated_count(),
        change,
    })
}
