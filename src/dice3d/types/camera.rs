//! Camera-related types and components
//!
//! This module contains the main camera marker component and the resource
//! remembering where the camera started so it can be reset.

use bevy::prelude::*;

/// Marker component for the main 3D camera
#[derive(Component)]
pub struct MainCamera;

/// Where the camera looks and where it goes back to on reset.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CameraRig {
    pub home: Vec3,
    pub target: Vec3,
}

impl CameraRig {
    pub fn new(home: Vec3) -> Self {
        Self {
            home,
            target: Vec3::ZERO,
        }
    }

    /// Orbit `position` around the vertical axis through the target.
    pub fn orbit(&self, position: Vec3, angle: f32) -> Vec3 {
        let offset = position - self.target;
        self.target + Quat::from_rotation_y(angle) * offset
    }

    /// Move `position` toward (negative `amount`) or away from the target,
    /// keeping the distance within `min..=max`.
    pub fn zoom(&self, position: Vec3, amount: f32, min: f32, max: f32) -> Vec3 {
        let offset = position - self.target;
        let distance = offset.length();
        if distance <= f32::EPSILON {
            return position;
        }
        let new_distance = (distance + amount).clamp(min, max);
        self.target + offset / distance * new_distance
    }

    /// The same view from the other side of the target.
    pub fn reverse(&self, position: Vec3) -> Vec3 {
        self.orbit(position, std::f32::consts::PI)
    }

    /// Mouse drag: sideways motion orbits, vertical motion raises or lowers
    /// the camera. Dragging down looks from higher up.
    pub fn drag(&self, position: Vec3, delta: Vec2, sensitivity: f32) -> Vec3 {
        let mut moved = self.orbit(position, -delta.x * sensitivity);
        let distance = (moved - self.target).length();
        moved.y += delta.y * sensitivity * distance;
        moved
    }
}
