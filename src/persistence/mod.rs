//! Durable persistence of the annotation store.
//!
//! The whole snapshot lives under one fixed key. It is loaded once at
//! startup and rewritten (debounced) after every store change. Saving is best
//! effort: a failed write is logged and the in-memory store stays
//! authoritative.
//!
//! ## Module Structure
//!
//! - [`storage`] - The [`storage::KeyValueStore`] trait with file and in-memory backends
//! - [`autosave`] - Hydration, the [`SaveDebouncer`] and the save systems

mod autosave;
mod storage;


pub use autosave::SaveDebouncer;
pub use storage::DurableStorage;

use bevy::prelude::*;

use crate::config::ConfigLoaded;
use crate::regions::{apply_region_clicks, RegionStoreChanged};

/// Ordering label for the startup hydration, so consumers can run after it
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreHydrated;

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DurableStorage>()
            .init_resource::<SaveDebouncer>()
            .add_systems(
                Startup,
                (autosave::configure_debouncer, autosave::hydrate_store_system)
                    .chain()
                    .after(ConfigLoaded)
                    .in_set(StoreHydrated),
            )
            .add_systems(
                Update,
                (
                    autosave::note_store_changes.run_if(on_message::<RegionStoreChanged>),
                    autosave::flush_due_saves,
                )
                    .chain()
                    .after(apply_region_clicks),
            )
            .add_systems(Last, autosave::flush_on_exit);
    }
}
