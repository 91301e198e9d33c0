//! Region annotation state: the store, the selection and the paint tool.
//!
//! ## Module Structure
//!
//! - [`record`] - Region ids, color tokens and [`RegionRecord`]
//! - [`store`] - [`RegionStore`], the single source of truth
//! - [`selection`] - The single active region
//! - [`paint`] - Paint modes, tagged paint actions and the stable [`PaintHandler`]
//!
//! Every mutation is announced with a [`RegionStoreChanged`] message, which the
//! persistence and render plugins consume.

mod paint;
mod record;
mod selection;
mod store;


pub use paint::{HandlerId, PaintAction, PaintHandler, PaintMode};
pub use record::{ColorToken, RegionId, RegionRecord};
pub use selection::Selection;
pub use store::{ChangeScope, RegionStore, StoreChange};

use bevy::prelude::*;

use crate::ui::OverlayState;

/// A region was clicked on the map.
#[derive(Message, Debug, Clone)]
pub struct RegionClicked {
    pub id: RegionId,
    pub display_name: String,
}

/// The store was mutated; carries the change notification.
#[derive(Message, Debug, Clone)]
pub struct RegionStoreChanged(pub StoreChange);

/// Select the clicked region and apply the active tool, in click order
pub fn apply_region_clicks(
    mut clicks: MessageReader<RegionClicked>,
    mut store: ResMut<RegionStore>,
    mut selection: ResMut<Selection>,
    mut overlay: ResMut<OverlayState>,
    handler: Res<PaintHandler>,
    mut changes: MessageWriter<RegionStoreChanged>,
) {
    for click in clicks.read() {
        let change = handler.invoke(&mut store, &mut selection, &click.id, &click.display_name);
        overlay.memo_panel_open = true;
        debug!("Painted region {} (revision {})", click.id, change.revision);
        changes.write(RegionStoreChanged(change));
    }
}

pub struct RegionsPlugin;

impl Plugin for RegionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RegionStore>()
            .init_resource::<Selection>()
            .init_resource::<PaintHandler>()
            .add_message::<RegionClicked>()
            .add_message::<RegionStoreChanged>()
            .add_systems(Update, apply_region_clicks.run_if(on_message::<RegionClicked>));
    }
}
