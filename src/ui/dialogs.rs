use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::theme;

use super::{NoticeKind, Notices};

/// Shows the oldest pending notice until it is dismissed
pub fn notice_dialog_ui(mut contexts: EguiContexts, mut notices: ResMut<Notices>) -> Result {
    let Some(notice) = notices.current().cloned() else {
        return Ok(());
    };

    let (title, color) = match notice.kind {
        NoticeKind::Success => ("Done", theme::SUCCESS_TEXT),
        NoticeKind::Error => ("Something went wrong", theme::ERROR_TEXT),
    };

    let mut dismissed = false;

    egui::Window::new(title)
        .id(egui::Id::new("notice_dialog"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.colored_label(color, &notice.message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notices.dismiss();
    }

    Ok(())
}

/// Tells the user their config file was unreadable and defaults are in use
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(reason).weak().small());
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }

    Ok(())
}
