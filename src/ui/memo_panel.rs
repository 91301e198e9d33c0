use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::regions::{RegionId, RegionStore, RegionStoreChanged, Selection};

use super::OverlayState;

/// Text buffer for the memo editor, bound to one region at a time
#[derive(Resource, Default)]
pub struct MemoDraft {
    region: Option<RegionId>,
    revision: Option<u64>,
    pub text: String,
}

impl MemoDraft {
    /// Reload the buffer from the store when the selection or the store changed.
    /// Edits are committed on every keystroke, so a reload never drops typing.
    pub fn sync(&mut self, selection: &Selection, store: &RegionStore) {
        let selected = selection.id();
        if self.region.as_ref() == selected && self.revision == Some(store.revision()) {
            return;
        }
        self.region = selected.cloned();
        self.revision = Some(store.revision());
        self.text = selected
            .and_then(|id| store.record(id).memo)
            .unwrap_or_default();
    }
}

/// Right-hand panel showing the selected region's name and memo
pub fn memo_panel_ui(
    mut contexts: EguiContexts,
    mut overlay: ResMut<OverlayState>,
    mut selection: ResMut<Selection>,
    mut store: ResMut<RegionStore>,
    mut draft: ResMut<MemoDraft>,
    mut changes: MessageWriter<RegionStoreChanged>,
) -> Result {
    draft.sync(&selection, &store);

    if !overlay.memo_panel_open {
        return Ok(());
    }
    let Some(current) = selection.current().cloned() else {
        return Ok(());
    };

    let mut should_close = false;
    let mut edited = false;

    egui::SidePanel::right("memo_panel")
        .resizable(true)
        .default_width(280.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(&current.display_name);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Deselect").clicked() {
                        should_close = true;
                    }
                });
            });
            ui.label(egui::RichText::new(current.id.as_str()).weak().small());
            ui.add_space(8.0);
            ui.separator();

            ui.label("Memo");
            let response = ui.add(
                egui::TextEdit::multiline(&mut draft.text)
                    .desired_rows(8)
                    .desired_width(f32::INFINITY)
                    .hint_text("Notes about this region"),
            );
            if response.changed() {
                edited = true;
            }
        });

    if edited && let Some(change) = store.set_memo(&selection, draft.text.clone()) {
        draft.revision = Some(change.revision);
        changes.write(RegionStoreChanged(change));
    }

    if should_close {
        selection.clear();
        overlay.memo_panel_open = false;
    }

    Ok(())
}
