//! Hydration at startup and debounced saving after every change.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use std::time::Duration;

use crate::config::AppConfig;
use crate::constants::STORAGE_KEY;
use crate::error::PersistenceError;
use crate::regions::{RegionStore, RegionStoreChanged};

use super::storage::{DurableStorage, KeyValueStore};

/// Delays saving until edits have been quiet for `delay`.
#[derive(Resource, Debug)]
pub struct SaveDebouncer {
    delay: Duration,
    due_at: Option<Duration>,
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::constants::DEFAULT_AUTOSAVE_DEBOUNCE_MS))
    }
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            due_at: None,
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Re-arm the timer after a change at `now`.
    pub fn note_change(&mut self, now: Duration) {
        self.due_at = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    /// True once per quiet period, when the pending save has come due.
    pub fn take_due(&mut self, now: Duration) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }

    /// Take the pending save immediately, due or not.
    pub fn take_pending(&mut self) -> bool {
        self.due_at.take().is_some()
    }
}

/// What startup hydration found in storage
#[derive(Debug, PartialEq, Eq)]
pub enum HydrateOutcome {
    Restored { records: usize },
    NothingStored,
    Discarded(String),
}

/// Compact encoding of the full snapshot for the storage slot
pub fn encode_for_storage(store: &RegionStore) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(&store.snapshot())?)
}

/// Load the stored snapshot into `store` in one atomic replace.
///
/// Missing, unreadable or malformed data leaves the store as it was.
pub fn hydrate(store: &mut RegionStore, backend: &dyn KeyValueStore) -> HydrateOutcome {
    let raw = match backend.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return HydrateOutcome::NothingStored,
        Err(e) => return HydrateOutcome::Discarded(e.to_string()),
    };

    let candidate = match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => value,
        Err(e) => return HydrateOutcome::Discarded(e.to_string()),
    };

    match store.replace_all(candidate) {
        Ok(_) => HydrateOutcome::Restored {
            records: store.len(),
        },
        Err(e) => HydrateOutcome::Discarded(e.to_string()),
    }
}

/// Write the current snapshot, logging instead of surfacing failures
pub fn save_snapshot(store: &RegionStore, backend: &dyn KeyValueStore) -> Result<(), PersistenceError> {
    let encoded = encode_for_storage(store)?;
    backend.set(STORAGE_KEY, &encoded)
}

/// Startup system applying configured timings
pub fn configure_debouncer(config: Res<AppConfig>, mut debouncer: ResMut<SaveDebouncer>) {
    debouncer.set_delay(config.data.autosave_debounce());
}

/// Startup system that restores the previous session's annotations
pub fn hydrate_store_system(mut store: ResMut<RegionStore>, storage: Res<DurableStorage>) {
    match hydrate(&mut store, storage.0.as_ref()) {
        HydrateOutcome::Restored { records } => {
            info!("Restored {} region annotations", records);
        }
        HydrateOutcome::NothingStored => {
            info!("No saved annotations found, starting empty");
        }
        HydrateOutcome::Discarded(reason) => {
            warn!("Ignoring saved annotations: {}", reason);
        }
    }
}

/// Re-arms the debouncer for every store change
pub fn note_store_changes(
    mut changes: MessageReader<RegionStoreChanged>,
    mut debouncer: ResMut<SaveDebouncer>,
    time: Res<Time>,
) {
    if changes.read().count() > 0 {
        debouncer.note_change(time.elapsed());
    }
}

/// Starts a fire-and-forget save once the debounce period has passed
pub fn flush_due_saves(
    store: Res<RegionStore>,
    storage: Res<DurableStorage>,
    mut debouncer: ResMut<SaveDebouncer>,
    time: Res<Time>,
) {
    if !debouncer.take_due(time.elapsed()) {
        return;
    }

    // Encode on the main thread so the task owns a point-in-time snapshot
    let encoded = match encode_for_storage(&store) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!("Skipping autosave: {}", e);
            return;
        }
    };

    let backend = storage.0.clone();
    let revision = store.revision();
    IoTaskPool::get()
        .spawn(async move {
            match backend.set(STORAGE_KEY, &encoded) {
                Ok(()) => debug!("Autosaved annotations (revision {})", revision),
                Err(e) => warn!("Autosave failed: {}", e),
            }
        })
        .detach();
}

/// Writes a still-pending save synchronously before the app closes
pub fn flush_on_exit(
    mut exit_events: MessageReader<AppExit>,
    store: Res<RegionStore>,
    storage: Res<DurableStorage>,
    mut debouncer: ResMut<SaveDebouncer>,
) {
    if exit_events.read().count() == 0 || !debouncer.take_pending() {
        return;
    }

    match save_snapshot(&store, storage.0.as_ref()) {
        Ok(()) => info!("Saved annotations before exit"),
        Err(e) => warn!("Failed to save annotations before exit: {}", e),
    }
}
