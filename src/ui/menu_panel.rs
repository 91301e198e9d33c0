use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::AppConfig;
use crate::regions::{ColorToken, PaintHandler, PaintMode, RegionStore};
use crate::theme;

use super::{DialogPurpose, FileDialogs, OverlayState};

/// Slide-over menu: palette, eraser and the share actions
pub fn menu_panel_ui(
    mut contexts: EguiContexts,
    mut overlay: ResMut<OverlayState>,
    handler: Res<PaintHandler>,
    store: Res<RegionStore>,
    config: Res<AppConfig>,
    mut dialogs: ResMut<FileDialogs>,
) -> Result {
    if !overlay.menu_open {
        return Ok(());
    }

    let mut should_close = false;
    let mut open_dialog = None;
    let active = handler.tool().get();

    egui::SidePanel::left("menu_panel")
        .resizable(false)
        .exact_width(220.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Mapmemo");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").on_hover_text("Hide menu").clicked() {
                        should_close = true;
                    }
                });
            });
            ui.add_space(8.0);
            ui.separator();

            ui.label(egui::RichText::new("Paint").strong());
            ui.add_space(4.0);

            for entry in theme::PALETTE.iter() {
                let mode = PaintMode::Color(ColorToken::from(entry.hex));
                let selected = active == mode;

                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 3.0, entry.swatch);

                    let button = egui::Button::new(entry.name)
                        .min_size(egui::vec2(140.0, 22.0))
                        .selected(selected);
                    if ui.add(button).clicked() {
                        handler.tool().set(mode.clone());
                    }
                });
            }

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(18.0, 18.0), egui::Sense::hover());
                ui.painter().rect_stroke(
                    rect,
                    3.0,
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                    egui::StrokeKind::Inside,
                );

                let button = egui::Button::new("Eraser")
                    .min_size(egui::vec2(140.0, 22.0))
                    .selected(active.is_eraser());
                if ui.add(button).on_hover_text("Clear a region's color, keep its memo").clicked() {
                    handler.tool().set(PaintMode::Eraser);
                }
            });

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(format!("{} regions annotated", store.annotated_count()))
                    .weak()
                    .small(),
            );

            ui.add_space(12.0);
            ui.separator();
            ui.label(egui::RichText::new("Share").strong());
            ui.add_space(4.0);

            ui.add_enabled_ui(!dialogs.is_pending(), |ui| {
                if ui.button("Export data...").clicked() {
                    open_dialog = Some(DialogPurpose::ExportData);
                }
                if ui.button("Import data...").clicked() {
                    open_dialog = Some(DialogPurpose::ImportData);
                }
                if ui.button("Save image...").clicked() {
                    open_dialog = Some(DialogPurpose::SaveImage);
                }
            });
        });

    if let Some(purpose) = open_dialog {
        dialogs.open(purpose, &config);
    }

    if should_close {
        overlay.menu_open = false;
    }

    Ok(())
}

/// Floating button that brings the menu back
pub fn menu_toggle_ui(mut contexts: EguiContexts, mut overlay: ResMut<OverlayState>) -> Result {
    if overlay.menu_open {
        return Ok(());
    }

    egui::Area::new(egui::Id::new("menu_toggle"))
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .show(contexts.ctx_mut()?, |ui| {
            if ui
                .add(egui::Button::new(egui::RichText::new("☰ Menu").size(14.0)))
                .clicked()
            {
                overlay.menu_open = true;
            }
        });

    Ok(())
}
