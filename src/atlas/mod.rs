//! Region atlas: the map's regions, their tiles and pointer hit-testing.
//!
//! The atlas stands in for the geographic geometry layer. It supplies region
//! ids and display names and turns clicks into [`RegionClicked`] messages.
//! It never looks at feature geometry.

mod features;
mod hover;
mod layout;

pub use features::{parse_atlas, RegionFeature};
pub use layout::RegionAtlas;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::MapCamera;
use crate::config::{AppConfig, ConfigLoaded};
use crate::constants::{DEFAULT_STROKE_WIDTH, REGION_TILE_SIZE};
use crate::error::AtlasError;
use crate::regions::{apply_region_clicks, RegionClicked};
use crate::render::{RegionNode, RegionSprites, RenderScheduler, REGION_Z};
use crate::theme;
use crate::ui::Notices;

fn load_atlas(config: &AppConfig) -> Result<RegionAtlas, AtlasError> {
    let path = config.data.atlas_file();
    let json = std::fs::read_to_string(&path)?;
    let features = parse_atlas(&json, &config.data.name_fields)?;
    info!("Loaded {} regions from {:?}", features.len(), path);
    Ok(RegionAtlas::from_features(features, REGION_TILE_SIZE))
}

/// Startup system that reads the atlas and spawns one tile per region
pub fn spawn_atlas_system(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut scheduler: ResMut<RenderScheduler>,
    mut sprites: ResMut<RegionSprites>,
    mut notices: ResMut<Notices>,
) {
    let atlas = match load_atlas(&config) {
        Ok(atlas) => atlas,
        Err(e) => {
            error!("Failed to load region atlas: {}", e);
            notices.error(format!("Could not load the region map: {}", e));
            RegionAtlas::default()
        }
    };

    sprites.nodes.clear();
    for tile in &atlas.tiles {
        let size = tile.rect.width();
        let stroke = commands
            .spawn((
                Sprite::from_color(theme::DEFAULT_STROKE, Vec2::splat(size)),
                Transform::from_translation(tile.rect.center().extend(REGION_Z)),
            ))
            .id();
        let fill = commands
            .spawn((
                Sprite::from_color(
                    theme::UNSET_REGION_FILL,
                    Vec2::splat(size - 2.0 * DEFAULT_STROKE_WIDTH),
                ),
                Transform::from_xyz(0.0, 0.0, 0.1),
                ChildOf(stroke),
            ))
            .id();

        sprites.nodes.insert(
            tile.id.clone(),
            RegionNode {
                stroke,
                fill,
                tile_size: size,
            },
        );
    }

    scheduler.set_regions(atlas.ids());
    commands.insert_resource(atlas);
}

/// The pointer's position in map coordinates, if it is over the window
fn pointer_world_position(
    window_query: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<MapCamera>>,
) -> Option<Vec2> {
    let window = window_query.single().ok()?;
    let (camera, camera_transform) = camera_query.single().ok()?;
    let cursor_pos = window.cursor_position()?;
    camera.viewport_to_world_2d(camera_transform, cursor_pos).ok()
}

/// Turns a left click on a region tile into a [`RegionClicked`] message
pub fn hit_test_regions(
    mouse_button: Res<ButtonInput<MouseButton>>,
    atlas: Res<RegionAtlas>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    mut clicks: MessageWriter<RegionClicked>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // Clicks on menus and panels never reach the map
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        return;
    }

    let Some(world_pos) = pointer_world_position(&window_query, &camera_query) else {
        return;
    };

    if let Some(tile) = atlas.hit_test(world_pos) {
        clicks.write(RegionClicked {
            id: tile.id.clone(),
            display_name: tile.display_name.clone(),
        });
    }
}

pub struct AtlasPlugin;

impl Plugin for AtlasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RegionAtlas>()
            .add_systems(
                Startup,
                (spawn_atlas_system.after(ConfigLoaded), hover::spawn_hover_preview),
            )
            .add_systems(
                Update,
                (
                    hit_test_regions.before(apply_region_clicks),
                    hover::update_hover_preview,
                ),
            );
    }
}
