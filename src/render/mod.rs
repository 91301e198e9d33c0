//! Region rendering.
//!
//! [`RenderScheduler`] decides which regions need new visuals; the systems
//! here push those visuals onto the region sprites spawned by the atlas.

mod scheduler;
mod visual;


pub use scheduler::RenderScheduler;
pub use visual::{render_region, VisualKey};

use bevy::prelude::*;
use std::collections::HashMap;

use crate::regions::{PaintHandler, RegionId, RegionStore, Selection};

/// Base depth of region tiles
pub const REGION_Z: f32 = 0.0;

/// Depth of the selected region, above its neighbours
pub const SELECTED_REGION_Z: f32 = 1.0;

/// The two sprites making up one region tile
#[derive(Debug, Clone, Copy)]
pub struct RegionNode {
    /// Full-size tile whose color shows as the border
    pub stroke: Entity,
    /// Inset child carrying the region's fill
    pub fill: Entity,
    pub tile_size: f32,
}

/// Index from region id to its sprites
#[derive(Resource, Default)]
pub struct RegionSprites {
    pub nodes: HashMap<RegionId, RegionNode>,
}

/// Ordering label for the sprite update; samplers run after it
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionVisualsApplied;

/// Applies the scheduler's redraw set to the affected sprites only
pub fn apply_render_plan(
    store: Res<RegionStore>,
    selection: Res<Selection>,
    handler: Res<PaintHandler>,
    mut scheduler: ResMut<RenderScheduler>,
    sprites: Res<RegionSprites>,
    mut query: Query<(&mut Sprite, &mut Transform)>,
) {
    let plan = scheduler.schedule(&store, &selection, handler.id());
    if plan.is_empty() {
        return;
    }

    for (id, visual) in &plan.redraw {
        let Some(node) = sprites.nodes.get(id) else {
            continue;
        };

        if let Ok((mut sprite, mut transform)) = query.get_mut(node.stroke) {
            sprite.color = visual.stroke;
            transform.translation.z = if visual.raised {
                SELECTED_REGION_Z
            } else {
                REGION_Z
            };
        }

        if let Ok((mut sprite, _)) = query.get_mut(node.fill) {
            sprite.color = visual.fill;
            let inset = (node.tile_size - 2.0 * visual.stroke_width).max(0.0);
            sprite.custom_size = Some(Vec2::splat(inset));
        }
    }

    trace!("Redrew {} regions", plan.redraw.len());
}

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderScheduler>()
            .init_resource::<RegionSprites>()
            .add_systems(PostUpdate, apply_render_plan.in_set(RegionVisualsApplied));
    }
}
