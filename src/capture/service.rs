use bevy::prelude::*;
use std::path::PathBuf;
use std::time::Duration;

use crate::ui::OverlayState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCapture {
    pub path: PathBuf,
    /// App-clock instant after which the map is sampled
    pub ready_at: Duration,
}

/// Captures waiting for the overlays to finish closing.
///
/// Any number may be pending and none can be cancelled. Each one samples the
/// visual state at its own deadline, so paint actions made during the wait
/// land in the image.
#[derive(Resource, Debug, Default)]
pub struct CaptureService {
    pending: Vec<PendingCapture>,
}

impl CaptureService {
    /// Close the overlays and schedule a sample `settle` after `now`
    pub fn request(
        &mut self,
        path: PathBuf,
        now: Duration,
        settle: Duration,
        overlay: &mut OverlayState,
    ) {
        overlay.close_all();
        self.pending.push(PendingCapture {
            path,
            ready_at: now + settle,
        });
    }

    /// Remove and return every capture whose settle interval has elapsed, in request order
    pub fn take_due(&mut self, now: Duration) -> Vec<PendingCapture> {
        let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|capture| capture.ready_at <= now);
        self.pending = waiting;
        due
    }

    pub fn pending(&self) -> &[PendingCapture] {
        &self.pending
    }
}
