use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::theme;

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct CameraZoom {
    pub scale: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Apply one wheel step to a zoom scale, clamped to a usable range
pub fn zoom_step(scale: f32, unit: MouseScrollUnit, amount: f32) -> f32 {
    let scroll_amount = match unit {
        MouseScrollUnit::Line => amount * 0.1,
        MouseScrollUnit::Pixel => amount * 0.001,
    };
    (scale - scroll_amount).clamp(0.1, 10.0)
}

pub fn spawn_camera(mut commands: Commands) {
    commands.insert_resource(ClearColor(theme::MAP_BACKGROUND));
    commands.spawn((
        Camera2d,
        MapCamera,
        CameraZoom::default(),
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut camera_query: Query<(&mut Transform, &CameraZoom), With<MapCamera>>,
) {
    if !mouse_button.pressed(MouseButton::Middle) && !mouse_button.pressed(MouseButton::Right) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, zoom)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        let delta = event.delta * zoom.scale;
        transform.translation.x -= delta.x;
        transform.translation.y += delta.y;
    }
}

pub fn camera_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut camera_query: Query<&mut CameraZoom, With<MapCamera>>,
    mut contexts: EguiContexts,
) {
    // Scrolling a panel must not zoom the map
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        scroll_events.clear();
        return;
    }

    let Ok(mut zoom) = camera_query.single_mut() else {
        return;
    };

    for event in scroll_events.read() {
        zoom.scale = zoom_step(zoom.scale, event.unit, event.y);
    }
}

pub fn apply_camera_zoom(
    mut camera_query: Query<(&CameraZoom, &mut Projection), (With<MapCamera>, Changed<CameraZoom>)>,
) {
    for (zoom, mut projection) in camera_query.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = zoom.scale;
        }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, (camera_pan, camera_zoom, apply_camera_zoom).chain());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_default_scale() {
        assert_eq!(CameraZoom::default().scale, 1.0);
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let scale = zoom_step(1.0, MouseScrollUnit::Line, 1.0);
        assert!((scale - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(zoom_step(0.15, MouseScrollUnit::Line, 5.0), 0.1);
        assert_eq!(zoom_step(9.9, MouseScrollUnit::Pixel, -1000.0), 10.0);
    }
}
