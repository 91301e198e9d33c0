//! Offscreen rasterization of the map scene. No UI is ever drawn here.

use bevy::prelude::*;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use crate::atlas::RegionAtlas;
use crate::constants::{CAPTURE_MARGIN, CAPTURE_SCALE};
use crate::error::CaptureError;
use crate::regions::RegionRecord;
use crate::render::{render_region, RenderScheduler, VisualKey};
use crate::theme;

/// One region tile as it looks at sampling time
#[derive(Debug, Clone)]
pub struct SceneTile {
    pub rect: Rect,
    pub fill: [u8; 4],
    pub stroke: [u8; 4],
    pub stroke_width: f32,
    pub raised: bool,
}

/// Map-only scene in world units
#[derive(Debug, Clone)]
pub struct MapScene {
    pub bounds: Rect,
    pub tiles: Vec<SceneTile>,
}

impl MapScene {
    /// Snapshot the atlas with the visuals currently applied to each region.
    /// Raised tiles come last so their borders are drawn on top.
    pub fn sample(atlas: &RegionAtlas, scheduler: &RenderScheduler) -> Result<Self, CaptureError> {
        let bounds = atlas.bounds().ok_or(CaptureError::EmptyScene)?;
        let unset = render_region(&VisualKey::derive(&RegionRecord::default(), false));

        let mut tiles: Vec<SceneTile> = atlas
            .tiles
            .iter()
            .map(|tile| {
                let visual = scheduler.visual(&tile.id).copied().unwrap_or(unset);
                SceneTile {
                    rect: tile.rect,
                    fill: theme::color_to_rgba8(visual.fill),
                    stroke: theme::color_to_rgba8(visual.stroke),
                    stroke_width: visual.stroke_width,
                    raised: visual.raised,
                }
            })
            .collect();
        tiles.sort_by_key(|tile| tile.raised);

        Ok(Self { bounds, tiles })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RasterOptions {
    /// Output pixels per world unit
    pub scale: f32,
    /// World units of background around the scene bounds
    pub margin: f32,
    pub background: [u8; 4],
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: CAPTURE_SCALE,
            margin: CAPTURE_MARGIN,
            background: theme::CAPTURE_BACKGROUND,
        }
    }
}

impl RasterOptions {
    /// Output size in pixels for a scene with the given bounds
    pub fn image_size(&self, bounds: Rect) -> (u32, u32) {
        let size = (bounds.size() + Vec2::splat(2.0 * self.margin)) * self.scale;
        (size.x.round().max(0.0) as u32, size.y.round().max(0.0) as u32)
    }
}

/// Turns a map scene into pixels
pub trait Rasterizer: Send + Sync + 'static {
    fn rasterize(&self, scene: &MapScene, options: &RasterOptions) -> Result<RgbaImage, CaptureError>;
}

/// Draws each tile as a stroke-colored square with its fill inset by the stroke width,
/// the same way the sprites are built.
#[derive(Debug, Default)]
pub struct TileRasterizer;

impl Rasterizer for TileRasterizer {
    fn rasterize(&self, scene: &MapScene, options: &RasterOptions) -> Result<RgbaImage, CaptureError> {
        if scene.tiles.is_empty() {
            return Err(CaptureError::EmptyScene);
        }

        let (width, height) = options.image_size(scene.bounds);
        if width == 0 || height == 0 {
            return Err(CaptureError::ZeroSize { width, height });
        }

        let mut image = RgbaImage::from_pixel(width, height, Rgba(options.background));

        // World y grows upward, image rows grow downward
        let origin = Vec2::new(
            scene.bounds.min.x - options.margin,
            scene.bounds.max.y + options.margin,
        );
        let to_pixels = |rect: Rect| {
            let left = (rect.min.x - origin.x) * options.scale;
            let right = (rect.max.x - origin.x) * options.scale;
            let top = (origin.y - rect.max.y) * options.scale;
            let bottom = (origin.y - rect.min.y) * options.scale;
            (left.round() as i32, top.round() as i32, right.round() as i32 - 1, bottom.round() as i32 - 1)
        };

        for tile in &scene.tiles {
            let (left, top, right, bottom) = to_pixels(tile.rect);
            fill_rect(&mut image, left, top, right, bottom, Rgba(tile.stroke));

            let inset = (tile.stroke_width * options.scale).round() as i32;
            if left + inset <= right - inset && top + inset <= bottom - inset {
                fill_rect(
                    &mut image,
                    left + inset,
                    top + inset,
                    right - inset,
                    bottom - inset,
                    Rgba(tile.fill),
                );
            }
        }

        Ok(image)
    }
}

fn fill_rect(image: &mut RgbaImage, left: i32, top: i32, right: i32, bottom: i32, color: Rgba<u8>) {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let left = left.max(0);
    let top = top.max(0);
    let right = right.min(width - 1);
    let bottom = bottom.min(height - 1);

    for y in top..=bottom {
        for x in left..=right {
            image.put_pixel(x as u32, y as u32, color);
        }
    }
}

pub fn encode_png(image: RgbaImage) -> Result<Vec<u8>, CaptureError> {
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image).write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}
