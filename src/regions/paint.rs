//! Paint modes, paint actions and the stable paint handler.

use bevy::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::record::{ColorToken, RegionId};
use super::selection::Selection;
use super::store::{RegionStore, StoreChange};

/// What a single paint interaction does to a region's color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintAction {
    SetColor(ColorToken),
    /// Clears the color field only; the record and its memo stay.
    ClearColor,
}

/// The currently armed tool: a concrete color or the eraser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaintMode {
    Color(ColorToken),
    Eraser,
}

impl PaintMode {
    pub fn action(&self) -> PaintAction {
        match self {
            PaintMode::Color(token) => PaintAction::SetColor(token.clone()),
            PaintMode::Eraser => PaintAction::ClearColor,
        }
    }

    pub fn is_eraser(&self) -> bool {
        matches!(self, PaintMode::Eraser)
    }
}

impl Default for PaintMode {
    fn default() -> Self {
        PaintMode::Color(ColorToken::from(crate::theme::PALETTE[0].hex))
    }
}

/// Shared cell holding the active paint mode.
///
/// Clones point at the same cell, so the paint handler sees tool changes
/// without being rebuilt.
#[derive(Debug, Clone, Default)]
pub struct ActiveTool(Arc<RwLock<PaintMode>>);

impl ActiveTool {
    pub fn get(&self) -> PaintMode {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, mode: PaintMode) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = mode;
    }
}

/// Identity of a paint handler. Part of the map view's memo key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The callback every region invokes when clicked.
///
/// Its identity never changes when the tool changes: the tool is read through
/// [`ActiveTool`] at invocation time.
#[derive(Resource, Debug)]
pub struct PaintHandler {
    id: HandlerId,
    tool: ActiveTool,
}

impl Default for PaintHandler {
    fn default() -> Self {
        Self::new(ActiveTool::default())
    }
}

impl PaintHandler {
    pub fn new(tool: ActiveTool) -> Self {
        Self {
            id: HandlerId::next(),
            tool,
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn tool(&self) -> &ActiveTool {
        &self.tool
    }

    /// Select the clicked region and apply the active tool to it.
    pub fn invoke(
        &self,
        store: &mut RegionStore,
        selection: &mut Selection,
        id: &RegionId,
        display_name: &str,
    ) -> StoreChange {
        selection.select(id.clone(), display_name);
        store.set_color(id, self.tool.get().action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_first_palette_color() {
        assert_eq!(PaintMode::default(), PaintMode::Color(ColorToken::from("#EF4444")));
    }

    #[test]
    fn test_mode_maps_to_tagged_action() {
        let blue = PaintMode::Color(ColorToken::from("#3B82F6"));
        assert_eq!(blue.action(), PaintAction::SetColor(ColorToken::from("#3B82F6")));
        assert_eq!(PaintMode::Eraser.action(), PaintAction::ClearColor);
        assert!(PaintMode::Eraser.is_eraser());
        assert!(!blue.is_eraser());
    }

    #[test]
    fn test_tool_change_keeps_handler_identity() {
        let handler = PaintHandler::default();
        let before = handler.id();
        handler.tool().set(PaintMode::Eraser);
        assert_eq!(handler.id(), before);
        assert_eq!(handler.tool().get(), PaintMode::Eraser);
    }

    #[test]
    fn test_cloned_tool_shares_cell() {
        let tool = ActiveTool::default();
        let handler = PaintHandler::new(tool.clone());
        tool.set(PaintMode::Color(ColorToken::from("#22C55E")));
        assert_eq!(
            handler.tool().get(),
            PaintMode::Color(ColorToken::from("#22C55E"))
        );
    }

    #[test]
    fn test_handlers_have_distinct_ids() {
        assert_ne!(PaintHandler::default().id(), PaintHandler::default().id());
    }

    #[test]
    fn test_invoke_selects_and_paints_with_current_tool() {
        let handler = PaintHandler::default();
        let mut store = RegionStore::default();
        let mut selection = Selection::default();
        let id = RegionId::from("geo-1");

        handler.tool().set(PaintMode::Color(ColorToken::from("#EAB308")));
        handler.invoke(&mut store, &mut selection, &id, "Otaru");

        assert!(selection.is_selected(&id));
        assert_eq!(
            store.record(&id).color,
            Some(ColorToken::from("#EAB308"))
        );

        handler.tool().set(PaintMode::Eraser);
        handler.invoke(&mut store, &mut selection, &id, "Otaru");
        assert_eq!(store.record(&id).color, None);
    }
}
