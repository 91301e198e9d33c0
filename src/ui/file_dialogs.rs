use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use std::path::PathBuf;

use crate::capture::CaptureMapRequest;
use crate::config::AppConfig;
use crate::snapshot::{ExportSnapshotRequest, ImportSnapshotRequest};

/// What the chosen path will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPurpose {
    ExportData,
    ImportData,
    SaveImage,
}

impl DialogPurpose {
    fn title(&self) -> &'static str {
        match self {
            DialogPurpose::ExportData => "Export Annotations",
            DialogPurpose::ImportData => "Import Annotations",
            DialogPurpose::SaveImage => "Save Map Image",
        }
    }

    fn filter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            DialogPurpose::ExportData | DialogPurpose::ImportData => ("JSON", &["json"]),
            DialogPurpose::SaveImage => ("PNG Image", &["png"]),
        }
    }

    fn default_file_name(&self, config: &AppConfig) -> Option<String> {
        match self {
            DialogPurpose::ExportData => Some(config.data.default_export_name.clone()),
            DialogPurpose::SaveImage => Some(config.data.default_image_name.clone()),
            DialogPurpose::ImportData => None,
        }
    }
}

struct PendingDialog {
    purpose: DialogPurpose,
    task: Task<Option<PathBuf>>,
}

/// The native file dialog currently open, if any
#[derive(Resource, Default)]
pub struct FileDialogs {
    pending: Option<PendingDialog>,
}

impl FileDialogs {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Open a native dialog for `purpose`. Ignored while another one is open.
    pub fn open(&mut self, purpose: DialogPurpose, config: &AppConfig) {
        if self.pending.is_some() {
            return;
        }

        let directory = config.data.export_dir();
        let file_name = purpose.default_file_name(config);
        let (filter_name, extensions) = purpose.filter();

        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title(purpose.title())
                .set_directory(&directory)
                .add_filter(filter_name, extensions);
            if let Some(name) = file_name {
                dialog = dialog.set_file_name(name);
            }

            let handle = match purpose {
                DialogPurpose::ImportData => dialog.pick_file().await,
                DialogPurpose::ExportData | DialogPurpose::SaveImage => dialog.save_file().await,
            };
            handle.map(|h| h.path().to_path_buf())
        });

        self.pending = Some(PendingDialog { purpose, task });
    }
}

/// Turns a finished dialog into the matching request message
pub fn poll_file_dialogs(
    mut dialogs: ResMut<FileDialogs>,
    mut export_events: MessageWriter<ExportSnapshotRequest>,
    mut import_events: MessageWriter<ImportSnapshotRequest>,
    mut capture_events: MessageWriter<CaptureMapRequest>,
) {
    let Some(pending) = dialogs.pending.as_mut() else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(&mut pending.task)) else {
        return;
    };
    let purpose = pending.purpose;
    dialogs.pending = None;

    let Some(path) = result else {
        debug!("{:?} dialog cancelled", purpose);
        return;
    };

    match purpose {
        DialogPurpose::ExportData => {
            export_events.write(ExportSnapshotRequest { path });
        }
        DialogPurpose::ImportData => {
            import_events.write(ImportSnapshotRequest { path });
        }
        DialogPurpose::SaveImage => {
            capture_events.write(CaptureMapRequest { path });
        }
    }
}
