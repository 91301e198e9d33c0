//! Per-region visual keys and the visuals derived from them.

use bevy::prelude::*;

use crate::constants::{DEFAULT_STROKE_WIDTH, SELECTED_STROKE_WIDTH};
use crate::regions::{ColorToken, RegionRecord};
use crate::theme;

/// Everything a region's appearance depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualKey {
    pub effective_color: ColorToken,
    pub is_selected: bool,
}

impl VisualKey {
    pub fn derive(record: &RegionRecord, is_selected: bool) -> Self {
        Self {
            effective_color: record
                .color
                .clone()
                .unwrap_or_else(|| ColorToken::from(theme::UNSET_REGION_HEX)),
            is_selected,
        }
    }
}

/// Resolved appearance of one region tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionVisual {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
    /// Drawn above its neighbours so the whole border shows
    pub raised: bool,
}

/// Compute a region's appearance from its key
pub fn render_region(key: &VisualKey) -> RegionVisual {
    let fill = theme::token_color(key.effective_color.as_str()).unwrap_or_else(|| {
        debug!("Unrecognised color token {:?}, drawing unset", key.effective_color);
        theme::UNSET_REGION_FILL
    });

    if key.is_selected {
        RegionVisual {
            fill,
            stroke: theme::SELECTED_STROKE,
            stroke_width: SELECTED_STROKE_WIDTH,
            raised: true,
        }
    } else {
        RegionVisual {
            fill,
            stroke: theme::DEFAULT_STROKE,
            stroke_width: DEFAULT_STROKE_WIDTH,
            raised: false,
        }
    }
}
