//! Map-only image export.
//!
//! A capture request closes the transient overlays, waits a settle interval
//! on the app clock, then rasterizes the region tiles offscreen with the
//! visuals applied at that moment. The PNG is written on the IO pool.
//!
//! - [`service`] - Pending captures and their deadlines
//! - [`raster`] - Scene sampling, the [`Rasterizer`] seam and PNG encoding

mod raster;
mod service;

#[cfg(test)]
mod tests;

pub use raster::{encode_png, MapScene, RasterOptions, Rasterizer, TileRasterizer};
pub use service::CaptureService;

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::path::PathBuf;

use crate::atlas::RegionAtlas;
use crate::common::ensure_suffix;
use crate::config::{AppConfig, UpdateLastExportDirRequest};
use crate::constants::IMAGE_SUFFIX;
use crate::error::CaptureError;
use crate::render::{RegionVisualsApplied, RenderScheduler};
use crate::ui::{Notices, OverlayState};

/// Save an image of the map to `path` (the `.png` suffix is enforced)
#[derive(Message)]
pub struct CaptureMapRequest {
    pub path: PathBuf,
}

/// Rasterizer used for captures
#[derive(Resource)]
pub struct CaptureRasterizer(pub Box<dyn Rasterizer>);

impl Default for CaptureRasterizer {
    fn default() -> Self {
        Self(Box::new(TileRasterizer))
    }
}

/// Component for an in-flight image write
#[derive(Component)]
pub struct CaptureTask(pub Task<Result<PathBuf, (PathBuf, CaptureError)>>);

pub fn request_capture_system(
    mut events: MessageReader<CaptureMapRequest>,
    mut service: ResMut<CaptureService>,
    mut overlay: ResMut<OverlayState>,
    config: Res<AppConfig>,
    time: Res<Time>,
) {
    let settle = config.data.capture_settle();
    for event in events.read() {
        service.request(event.path.clone(), time.elapsed(), settle, &mut overlay);
        debug!(
            "Capture of {:?} scheduled in {:?} ({} pending)",
            event.path,
            settle,
            service.pending().len()
        );
    }
}

/// Samples every capture whose settle interval is over, after this frame's
/// visuals have been applied
pub fn sample_due_captures(
    mut commands: Commands,
    mut service: ResMut<CaptureService>,
    atlas: Option<Res<RegionAtlas>>,
    scheduler: Res<RenderScheduler>,
    rasterizer: Res<CaptureRasterizer>,
    mut notices: ResMut<Notices>,
    time: Res<Time>,
) {
    let due = service.take_due(time.elapsed());
    if due.is_empty() {
        return;
    }

    for capture in due {
        let path = ensure_suffix(&capture.path, IMAGE_SUFFIX);

        let bytes = atlas
            .as_deref()
            .ok_or(CaptureError::EmptyScene)
            .and_then(|atlas| MapScene::sample(atlas, &scheduler))
            .and_then(|scene| rasterizer.0.rasterize(&scene, &RasterOptions::default()))
            .and_then(encode_png);

        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Capture of {:?} failed: {}", path, e);
                notices.error(format!("Could not save the map image: {}", e));
                continue;
            }
        };

        let task = IoTaskPool::get().spawn(async move {
            match std::fs::write(&path, bytes) {
                Ok(()) => Ok(path),
                Err(e) => Err((path, CaptureError::Write(e))),
            }
        });
        commands.spawn(CaptureTask(task));
    }
}

pub fn poll_capture_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut CaptureTask)>,
    mut notices: ResMut<Notices>,
    mut config_events: MessageWriter<UpdateLastExportDirRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        match result {
            Ok(path) => {
                info!("Map image saved to {:?}", path);
                if let Some(dir) = path.parent() {
                    config_events.write(UpdateLastExportDirRequest {
                        dir: dir.to_path_buf(),
                    });
                }
                notices.success(format!("Saved map image to {}", path.display()));
            }
            Err((path, e)) => {
                error!("Failed to write map image {:?}: {}", path, e);
                notices.error(format!("Could not save the map image: {}", e));
            }
        }

        commands.entity(entity).despawn();
    }
}

pub struct CapturePlugin;

impl Plugin for CapturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CaptureService>()
            .init_resource::<CaptureRasterizer>()
            .add_message::<CaptureMapRequest>()
            .add_systems(
                Update,
                (
                    request_capture_system.run_if(on_message::<CaptureMapRequest>),
                    poll_capture_tasks,
                ),
            )
            .add_systems(PostUpdate, sample_due_captures.after(RegionVisualsApplied));
    }
}
