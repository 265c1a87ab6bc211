//! Camera control systems
//!
//! Orbit, zoom, raise, reverse and reset, from the keyboard and the mouse.
//! The roll controller moves the camera too, during the start and end
//! animations; it picks up wherever the user left it.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::dice3d::types::*;

/// System to handle camera rotation and keyboard zoom
pub fn rotate_camera(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    settings: Res<StageSettings>,
    rig: Res<CameraRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let camera = &settings.camera;
    let dt = time.delta_secs();

    for mut transform in camera_query.iter_mut() {
        if keyboard.just_pressed(KeyCode::KeyZ) {
            transform.translation = rig.home;
            *transform = transform.looking_at(rig.target, Vec3::Y);
            continue;
        }

        if keyboard.just_pressed(KeyCode::KeyX) {
            transform.translation = rig.reverse(transform.translation);
            *transform = transform.looking_at(rig.target, Vec3::Y);
            continue;
        }

        let mut angle = 0.0;
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            angle += camera.orbit_speed * dt;
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            angle -= camera.orbit_speed * dt;
        }

        let mut zoom = 0.0;
        if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
            zoom -= camera.zoom_speed * dt;
        }
        if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
            zoom += camera.zoom_speed * dt;
        }

        let mut lift = 0.0;
        if keyboard.pressed(KeyCode::KeyR) {
            lift += camera.zoom_speed * dt;
        }
        if keyboard.pressed(KeyCode::KeyF) {
            lift -= camera.zoom_speed * dt;
        }

        if angle == 0.0 && zoom == 0.0 && lift == 0.0 {
            continue;
        }

        let mut position = rig.orbit(transform.translation, angle);
        position = rig.zoom(position, zoom, camera.min_distance, camera.max_distance);
        position.y += lift;

        transform.translation = position;
        *transform = transform.looking_at(rig.target, Vec3::Y);
    }
}

/// Pixels per wheel "line" on devices that report pixel scrolling.
const PIXELS_PER_LINE: f32 = 16.0;

/// Mouse wheel zooms, dragging with the left button moves the camera.
pub fn mouse_camera(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut mouse_motion: MessageReader<MouseMotion>,
    settings: Res<StageSettings>,
    rig: Res<CameraRig>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let camera = &settings.camera;

    let mut lines = 0.0;
    for event in mouse_wheel.read() {
        lines += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        };
    }

    // Motion is drained every frame so a drag never replays stale deltas.
    let mut drag = Vec2::ZERO;
    for motion in mouse_motion.read() {
        drag += motion.delta;
    }
    if !mouse_button.pressed(MouseButton::Left) {
        drag = Vec2::ZERO;
    }

    if lines == 0.0 && drag == Vec2::ZERO {
        return;
    }

    for mut transform in camera_query.iter_mut() {
        let mut position = transform.translation;
        if drag != Vec2::ZERO {
            position = rig.drag(position, drag, camera.mouse_sensitivity);
        }
        if lines != 0.0 {
            // Wheel up moves in.
            let amount = -lines * camera.wheel_zoom_step;
            position = rig.zoom(position, amount, camera.min_distance, camera.max_distance);
        }

        transform.translation = position;
        *transform = transform.looking_at(rig.target, Vec3::Y);
    }
}
