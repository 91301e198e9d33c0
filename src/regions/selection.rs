use bevy::prelude::*;

use super::record::RegionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRegion {
    pub id: RegionId,
    pub display_name: String,
}

/// The single active region, if any. Memo edits are scoped to it.
#[derive(Resource, Debug, Default)]
pub struct Selection {
    current: Option<SelectedRegion>,
}

impl Selection {
    /// Replace the current selection. Never touches any region record.
    pub fn select(&mut self, id: RegionId, display_name: impl Into<String>) {
        self.current = Some(SelectedRegion {
            id,
            display_name: display_name.into(),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&SelectedRegion> {
        self.current.as_ref()
    }

    pub fn id(&self) -> Option<&RegionId> {
        self.current.as_ref().map(|s| &s.id)
    }

    pub fn is_selected(&self, id: &RegionId) -> bool {
        self.id() == Some(id)
    }
}
