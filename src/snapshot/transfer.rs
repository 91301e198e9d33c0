//! File-backed export/import of snapshots, with IO on the task pool.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::path::PathBuf;

use crate::common::ensure_suffix;
use crate::config::UpdateLastExportDirRequest;
use crate::constants::SNAPSHOT_SUFFIX;
use crate::error::SnapshotError;
use crate::regions::{RegionStore, RegionStoreChanged};
use crate::ui::Notices;

use super::codec::{export_snapshot, import_snapshot};

/// Write the full snapshot to `path` (the `.json` suffix is enforced)
#[derive(Message)]
pub struct ExportSnapshotRequest {
    pub path: PathBuf,
}

/// Replace the store with the snapshot stored at `path`
#[derive(Message)]
pub struct ImportSnapshotRequest {
    pub path: PathBuf,
}

/// Outcome of a snapshot file operation
pub enum TransferResult {
    Exported { path: PathBuf },
    ExportFailed { path: PathBuf, error: SnapshotError },
    Read { path: PathBuf, bytes: Vec<u8> },
    ReadFailed { path: PathBuf, error: std::io::Error },
}

/// Component for an in-flight snapshot file task
#[derive(Component)]
pub struct SnapshotTask(pub Task<TransferResult>);

/// Encodes the snapshot now and writes it in the background
pub fn export_snapshot_system(
    mut commands: Commands,
    mut events: MessageReader<ExportSnapshotRequest>,
    store: Res<RegionStore>,
    mut notices: ResMut<Notices>,
) {
    for event in events.read() {
        let path = ensure_suffix(&event.path, SNAPSHOT_SUFFIX);

        let bytes = match export_snapshot(&store) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("{}", e);
                notices.error(format!("Export failed: {}", e));
                continue;
            }
        };

        let task = IoTaskPool::get().spawn(async move {
            match std::fs::write(&path, bytes) {
                Ok(()) => TransferResult::Exported { path },
                Err(e) => TransferResult::ExportFailed {
                    path,
                    error: SnapshotError::Write(e),
                },
            }
        });
        commands.spawn(SnapshotTask(task));
    }
}

/// Reads the chosen file in the background; decoding happens on completion
pub fn import_snapshot_system(
    mut commands: Commands,
    mut events: MessageReader<ImportSnapshotRequest>,
) {
    for event in events.read() {
        let path = event.path.clone();
        let task = IoTaskPool::get().spawn(async move {
            match std::fs::read(&path) {
                Ok(bytes) => TransferResult::Read { path, bytes },
                Err(error) => TransferResult::ReadFailed { path, error },
            }
        });
        commands.spawn(SnapshotTask(task));
    }
}

/// Polls snapshot tasks and applies finished imports to the store
pub fn poll_snapshot_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SnapshotTask)>,
    mut store: ResMut<RegionStore>,
    mut notices: ResMut<Notices>,
    mut changes: MessageWriter<RegionStoreChanged>,
    mut config_events: MessageWriter<UpdateLastExportDirRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        match result {
            TransferResult::Exported { path } => {
                info!("Annotations exported to {:?}", path);
                if let Some(dir) = path.parent() {
                    config_events.write(UpdateLastExportDirRequest {
                        dir: dir.to_path_buf(),
                    });
                }
                notices.success(format!("Saved annotations to {}", path.display()));
            }
            TransferResult::ExportFailed { path, error } => {
                error!("Failed to export annotations to {:?}: {}", path, error);
                notices.error(format!("Export failed: {}", error));
            }
            TransferResult::Read { path, bytes } => match import_snapshot(&mut store, &bytes) {
                Ok(summary) => {
                    info!(
                        "Imported {} region records from {:?}",
                        summary.records, path
                    );
                    notices.success(format!(
                        "Loaded annotations for {} regions",
                        summary.annotated
                    ));
                    changes.write(RegionStoreChanged(summary.change));
                }
                Err(e) => {
                    warn!("Rejected import from {:?}: {}", path, e);
                    notices.error(format!("Could not load {}: {}", path.display(), e));
                }
            },
            TransferResult::ReadFailed { path, error } => {
                warn!("Failed to read {:?}: {}", path, error);
                notices.error(format!("Could not read {}: {}", path.display(), error));
            }
        }

        commands.entity(entity).despawn();
    }
}
