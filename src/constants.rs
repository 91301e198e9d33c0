//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Durable storage key holding the full annotation snapshot
pub const STORAGE_KEY: &str = "region_annotations";

/// Quiet period after the last change before the snapshot is saved
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 400;

/// Time given to closing overlays before the map is sampled.
/// A heuristic; slow machines may need more (configurable).
pub const DEFAULT_CAPTURE_SETTLE_MS: u64 = 300;

/// Device pixel multiplier for exported images
pub const CAPTURE_SCALE: f32 = 2.0;

/// Empty margin around the map in exported images, in world units
pub const CAPTURE_MARGIN: f32 = 16.0;

/// Edge length of one region tile, in world units
pub const REGION_TILE_SIZE: f32 = 64.0;

/// Border width of an unselected region
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// Opacity of the armed color previewed under the pointer
pub const HOVER_PREVIEW_ALPHA: f32 = 0.7;

/// Border width of the selected region
pub const SELECTED_STROKE_WIDTH: f32 = 3.0;

/// Label used when a feature has no usable name field
pub const FALLBACK_REGION_NAME: &str = "Unnamed region";

/// Property names tried, in order, for a region's display name
pub const DEFAULT_NAME_FIELDS: [&str; 2] = ["N03_004", "N03_003"];

/// Suffix enforced on exported snapshots
pub const SNAPSHOT_SUFFIX: &str = ".json";

/// Suffix enforced on exported images
pub const IMAGE_SUFFIX: &str = ".png";
