//! egui chrome around the map: the slide-over menu, the memo panel and the
//! notice dialogs.

mod dialogs;
mod file_dialogs;
mod memo_panel;
mod menu_panel;

pub use file_dialogs::{DialogPurpose, FileDialogs};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;
use std::collections::VecDeque;

/// Visibility of the transient overlays that must not appear in captures.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct OverlayState {
    /// Slide-over menu with the palette and the share actions
    pub menu_open: bool,
    /// Memo side panel for the selected region
    pub memo_panel_open: bool,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            menu_open: true,
            memo_panel_open: false,
        }
    }
}

impl OverlayState {
    /// Hide every overlay, whatever its current state
    pub fn close_all(&mut self) {
        self.menu_open = false;
        self.memo_panel_open = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Queue of user-facing results (export, import, capture), shown one at a time
#[derive(Resource, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn success(&mut self, message: String) {
        self.push(NoticeKind::Success, message);
    }

    pub fn error(&mut self, message: String) {
        self.push(NoticeKind::Error, message);
    }

    fn push(&mut self, kind: NoticeKind, message: String) {
        self.queue.push_back(Notice { kind, message });
    }

    /// The oldest notice not yet dismissed
    pub fn current(&self) -> Option<&Notice> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) {
        self.queue.pop_front();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverlayState>()
            .init_resource::<Notices>()
            .init_resource::<FileDialogs>()
            .init_resource::<memo_panel::MemoDraft>()
            .add_systems(Update, file_dialogs::poll_file_dialogs)
            // Side panels first so the toggle button lays out beside them
            .add_systems(
                EguiPrimaryContextPass,
                (menu_panel::menu_panel_ui, memo_panel::memo_panel_ui).chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    menu_panel::menu_toggle_ui,
                    dialogs::notice_dialog_ui,
                    dialogs::config_reset_notification_ui,
                )
                    .after(memo_panel::memo_panel_ui),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_all_hides_both_overlays() {
        let mut overlay = OverlayState {
            menu_open: true,
            memo_panel_open: true,
        };
        overlay.close_all();
        assert!(!overlay.menu_open);
        assert!(!overlay.memo_panel_open);

        // Already closed stays closed
        overlay.close_all();
        assert_eq!(
            overlay,
            OverlayState {
                menu_open: false,
                memo_panel_open: false
            }
        );
    }

    #[test]
    fn test_notices_are_shown_in_order() {
        let mut notices = Notices::default();
        assert!(notices.current().is_none());

        notices.success("Saved".to_string());
        notices.error("Failed".to_string());
        assert_eq!(notices.len(), 2);

        let first = notices.current().unwrap();
        assert_eq!(first.kind, NoticeKind::Success);
        assert_eq!(first.message, "Saved");

        notices.dismiss();
        assert_eq!(notices.current().unwrap().kind, NoticeKind::Error);

        notices.dismiss();
        notices.dismiss();
        assert!(notices.is_empty());
    }
}
