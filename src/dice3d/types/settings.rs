//! Stage settings types and loading
//!
//! Settings are read once at startup from an optional RON or JSON file.
//! Every field has a default, so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Physics
// ============================================================================

/// Tunables for the rigid-body world. The defaults were calibrated against the
/// fixed 0.042s step, so change them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: [f32; 3],
    pub restitution: f32,
    pub die_mass: f32,
    pub die_half_extent: f32,
    /// Height of the floor plane.
    pub floor_offset: f32,
    /// Distance of each 45 degree wall plane from the origin, along its normal.
    pub wall_offset: f32,
    pub step_seconds: f32,
    pub max_substeps: u32,
    pub max_substep_seconds: f32,
    /// Sideways impulse magnitude is drawn from `0..impulse_x_max`.
    pub impulse_x_max: f32,
    pub impulse_z_min: f32,
    pub impulse_z_max: f32,
    /// Off-center point the impulse is applied at, relative to the die center.
    /// The x component is mirrored for the second die.
    pub impulse_point: [f32; 3],
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -10.0, 0.0],
            restitution: 0.85,
            die_mass: 1.5,
            die_half_extent: 3.0,
            floor_offset: 0.0,
            wall_offset: 1.0,
            step_seconds: 0.042,
            max_substeps: 5,
            max_substep_seconds: 0.1,
            impulse_x_max: 2.0,
            impulse_z_min: -6.0,
            impulse_z_max: -4.0,
            impulse_point: [-4.0, 0.0, -4.0],
        }
    }
}

impl PhysicsSettings {
    /// Number of integration sub-steps needed to cover one fixed step.
    pub fn substeps(&self) -> u32 {
        if self.max_substep_seconds <= 0.0 {
            return 1;
        }
        let needed = (self.step_seconds / self.max_substep_seconds).ceil() as u32;
        needed.clamp(1, self.max_substeps.max(1))
    }
}

// ============================================================================
// Camera
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Where the camera sits while the dice are thrown.
    pub initial_position: [f32; 3],
    /// Where the camera ends up so the dice can be read.
    pub final_position: [f32; 3],
    /// Radians per second for A/D orbiting.
    pub orbit_speed: f32,
    /// Units per second for W/S zoom and R/F lift.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians (and lift per unit of distance) per pixel of mouse drag.
    pub mouse_sensitivity: f32,
    /// Units per mouse-wheel line.
    pub wheel_zoom_step: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            initial_position: [0.0, 120.0, 120.0],
            final_position: [0.0, 40.0, 40.0],
            orbit_speed: 1.0,
            zoom_speed: 60.0,
            min_distance: 20.0,
            max_distance: 300.0,
            mouse_sensitivity: 0.005,
            wheel_zoom_step: 5.0,
        }
    }
}

impl CameraSettings {
    pub fn initial(&self) -> Vec3 {
        Vec3::from_array(self.initial_position)
    }

    pub fn final_pos(&self) -> Vec3 {
        Vec3::from_array(self.final_position)
    }
}

// ============================================================================
// Window and colors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Dice Stage".to_string(),
            width: 1000,
            height: 900,
        }
    }
}

/// Simple serializable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSetting {
    #[serde(default = "default_alpha")]
    pub a: f32,
    #[serde(default)]
    pub r: f32,
    #[serde(default)]
    pub g: f32,
    #[serde(default)]
    pub b: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl ColorSetting {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { a, r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::srgba(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Die body color; alpha below 1.0 renders the dice translucent.
    pub dice: ColorSetting,
    pub pips: ColorSetting,
    pub floor: ColorSetting,
    pub walls: ColorSetting,
    pub background: ColorSetting,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            dice: ColorSetting::rgba(0.92, 0.9, 0.86, 1.0),
            pips: ColorSetting::rgba(0.08, 0.08, 0.1, 1.0),
            // Green felt floor, blue felt walls.
            floor: ColorSetting::rgba(0.1, 0.38, 0.16, 1.0),
            walls: ColorSetting::rgba(0.1, 0.18, 0.42, 1.0),
            background: ColorSetting::rgba(0.05, 0.05, 0.08, 1.0),
        }
    }
}

// ============================================================================
// Stage
// ============================================================================

/// Everything configurable about the dice stage.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Seed for the process-wide random generator. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub physics: PhysicsSettings,
    pub colors: ColorSettings,
}

impl StageSettings {
    /// Read settings from a `.json` or `.ron` file.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file {}: {}", path.display(), e))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse settings file {}: {}", path.display(), e))
        } else {
            Self::from_ron_or_json(&contents)
        }
    }

    /// Parse settings text, trying RON first and falling back to JSON.
    pub fn from_ron_or_json(contents: &str) -> Result<Self, String> {
        match ron::de::from_str::<StageSettings>(contents) {
            Ok(settings) => Ok(settings),
            Err(ron_err) => serde_json::from_str::<StageSettings>(contents).map_err(|json_err| {
                format!(
                    "RON decode failed: {}; JSON decode failed: {}",
                    ron_err, json_err
                )
            }),
        }
    }
}
