//! Translucent preview of the armed paint color over the hovered region.
//!
//! The armed tool is not an input of the render scheduler, so the preview is a
//! single sprite moved between tiles and never touches region visuals.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::MapCamera;
use crate::constants::HOVER_PREVIEW_ALPHA;
use crate::regions::{PaintHandler, PaintMode};
use crate::theme;

use super::{pointer_world_position, RegionAtlas};

/// Above every region, including the raised selected one
const HOVER_Z: f32 = 2.0;

#[derive(Component)]
pub struct HoverPreview;

/// Preview color for the armed mode; the eraser previews the unset fill
pub fn hover_fill(mode: &PaintMode) -> Color {
    let base = match mode {
        PaintMode::Color(token) => {
            theme::token_color(token.as_str()).unwrap_or(theme::UNSET_REGION_FILL)
        }
        PaintMode::Eraser => theme::UNSET_REGION_FILL,
    };
    base.with_alpha(HOVER_PREVIEW_ALPHA)
}

pub fn spawn_hover_preview(mut commands: Commands) {
    commands.spawn((
        HoverPreview,
        Sprite::from_color(Color::NONE, Vec2::ONE),
        Transform::from_xyz(0.0, 0.0, HOVER_Z),
        Visibility::Hidden,
    ));
}

pub fn update_hover_preview(
    atlas: Res<RegionAtlas>,
    handler: Res<PaintHandler>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    mut contexts: EguiContexts,
    mut preview_query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<HoverPreview>>,
) {
    let Ok((mut sprite, mut transform, mut visibility)) = preview_query.single_mut() else {
        return;
    };

    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false);

    let tile = if over_ui {
        None
    } else {
        pointer_world_position(&window_query, &camera_query).and_then(|pos| atlas.hit_test(pos))
    };

    let Some(tile) = tile else {
        visibility.set_if_neq(Visibility::Hidden);
        return;
    };

    sprite.color = hover_fill(&handler.tool().get());
    sprite.custom_size = Some(tile.rect.size());
    transform.translation = tile.rect.center().extend(HOVER_Z);
    visibility.set_if_neq(Visibility::Visible);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::ColorToken;

    #[test]
    fn test_preview_uses_armed_color_at_reduced_opacity() {
        let mode = PaintMode::Color(ColorToken::from("#3B82F6"));
        let rgba = theme::color_to_rgba8(hover_fill(&mode));
        assert_eq!(&rgba[..3], &[0x3B, 0x82, 0xF6]);
        assert_eq!(rgba[3], (0.7_f32 * 255.0).round() as u8);
    }

    #[test]
    fn test_eraser_previews_unset_fill() {
        let rgba = theme::color_to_rgba8(hover_fill(&PaintMode::Eraser));
        let unset = theme::color_to_rgba8(theme::UNSET_REGION_FILL);
        assert_eq!(&rgba[..3], &unset[..3]);
    }

    #[test]
    fn test_unparseable_token_previews_unset_fill() {
        let mode = PaintMode::Color(ColorToken::from("chartreuse-ish"));
        let rgba = theme::color_to_rgba8(hover_fill(&mode));
        let unset = theme::color_to_rgba8(theme::UNSET_REGION_FILL);
        assert_eq!(&rgba[..3], &unset[..3]);
    }
}
