//! Snapshot export and import.
//!
//! - [`codec`] - Pure encode/decode of the store ([`export_snapshot`], [`import_snapshot`])
//! - [`transfer`] - Messages and systems moving snapshots to and from files

mod codec;
mod transfer;

#[cfg(test)]
mod tests;

pub use codec::{export_snapshot, import_snapshot};
pub use transfer::{ExportSnapshotRequest, ImportSnapshotRequest};

use bevy::prelude::*;

pub struct SnapshotPlugin;

impl Plugin for SnapshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ExportSnapshotRequest>()
            .add_message::<ImportSnapshotRequest>()
            .add_systems(
                Update,
                (
                    transfer::export_snapshot_system.run_if(on_message::<ExportSnapshotRequest>),
                    transfer::import_snapshot_system.run_if(on_message::<ImportSnapshotRequest>),
                    transfer::poll_snapshot_tasks,
                ),
            );
    }
}
