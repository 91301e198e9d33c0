//! Centralized color theme for the application.
//!
//! This module provides the paint palette and every color used when drawing
//! regions and exporting images. Modify values here to change the scheme.

use bevy::prelude::{Color, Srgba};
use bevy_egui::egui;

// ============================================================================
// Paint Palette
// ============================================================================

/// A paint color offered in the menu
pub struct PaletteEntry {
    pub name: &'static str,
    pub hex: &'static str,
    pub swatch: egui::Color32,
}

/// Paint colors, in menu order. The first one is armed at startup.
pub const PALETTE: [PaletteEntry; 4] = [
    PaletteEntry {
        name: "Red",
        hex: "#EF4444",
        swatch: egui::Color32::from_rgb(0xEF, 0x44, 0x44),
    },
    PaletteEntry {
        name: "Blue",
        hex: "#3B82F6",
        swatch: egui::Color32::from_rgb(0x3B, 0x82, 0xF6),
    },
    PaletteEntry {
        name: "Yellow",
        hex: "#EAB308",
        swatch: egui::Color32::from_rgb(0xEA, 0xB3, 0x08),
    },
    PaletteEntry {
        name: "Green",
        hex: "#22C55E",
        swatch: egui::Color32::from_rgb(0x22, 0xC5, 0x5E),
    },
];

// ============================================================================
// Region Colors
// ============================================================================

/// Fill of a region without a color
pub const UNSET_REGION_HEX: &str = "#D6D6DA";

pub const UNSET_REGION_FILL: Color = Color::srgb(0.839, 0.839, 0.855);

/// Border of the selected region
pub const SELECTED_STROKE: Color = Color::srgb(0.0, 0.0, 0.0);

/// Border of every other region
pub const DEFAULT_STROKE: Color = Color::srgb(1.0, 1.0, 1.0);

// ============================================================================
// Capture Colors
// ============================================================================

/// Flat background behind exported map images (the map has none of its own)
pub const CAPTURE_BACKGROUND: [u8; 4] = [0xF0, 0xF0, 0xF0, 0xFF];

/// Clear color of the map window, matching the exported background
pub const MAP_BACKGROUND: Color = Color::srgb(0.941, 0.941, 0.941);

// ============================================================================
// UI Colors
// ============================================================================

/// Green for success notices
pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

/// Red for error notices
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(230, 80, 80);

/// Parse a `#RRGGBB` token into a render color
pub fn token_color(hex: &str) -> Option<Color> {
    Srgba::hex(hex).ok().map(Color::from)
}

/// Convert a render color to RGBA bytes for rasterizing
pub fn color_to_rgba8(color: Color) -> [u8; 4] {
    let srgba = color.to_srgba();
    [
        channel_to_u8(srgba.red),
        channel_to_u8(srgba.green),
        channel_to_u8(srgba.blue),
        channel_to_u8(srgba.alpha),
    ]
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_hex_codes_parse() {
        for entry in &PALETTE {
            assert!(token_color(entry.hex).is_some(), "{} should parse", entry.name);
        }
    }

    #[test]
    fn test_unset_fill_matches_hex() {
        let parsed = token_color(UNSET_REGION_HEX).unwrap();
        assert_eq!(color_to_rgba8(parsed), color_to_rgba8(UNSET_REGION_FILL));
    }

    #[test]
    fn test_invalid_token_does_not_parse() {
        assert!(token_color("not-a-color").is_none());
        assert!(token_color("").is_none());
    }

    #[test]
    fn test_color_to_rgba8_extremes() {
        assert_eq!(color_to_rgba8(Color::srgb(1.0, 0.0, 0.0)), [255, 0, 0, 255]);
        assert_eq!(color_to_rgba8(Color::srgba(0.0, 0.0, 0.0, 0.0)), [0, 0, 0, 0]);
    }

    #[test]
    fn test_map_background_matches_capture_background() {
        assert_eq!(color_to_rgba8(MAP_BACKGROUND), CAPTURE_BACKGROUND);
    }
}
