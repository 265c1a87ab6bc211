//! Dice-related types and components
//!
//! This module contains the fixed geometry of the dice stage, the `Die`
//! component, the per-die tracking state owned by the roll controller, and
//! the results read off the dice once a roll has settled.

use bevy::prelude::*;

/// The stage always rolls exactly two dice.
pub const DIE_COUNT: usize = 2;

/// Uniform scale applied to the unit die mesh (half-extent 3 physics box).
pub const DIE_SCALE: f32 = 3.0;

/// Added to the physics origin so the rendered die sits on the floor even
/// when it is standing on a corner.
pub const PIVOT_Y_OFFSET: f32 = 1.75;

/// Where the start-of-roll animation parks each die before physics takes over.
pub const START_POSITIONS: [Vec3; DIE_COUNT] =
    [Vec3::new(15.0, 30.0, 0.0), Vec3::new(-15.0, 30.0, 0.0)];

/// Where the end-of-roll animation brings each die so it can be read.
pub const END_POSITIONS: [Vec3; DIE_COUNT] = [Vec3::new(7.0, 3.0, 0.0), Vec3::new(-7.0, 3.0, 0.0)];

/// Offset from the start position to where the dice sit before the first roll.
pub const SESSION_OFFSETS: [Vec3; DIE_COUNT] =
    [Vec3::new(10.0, 0.0, 40.0), Vec3::new(-10.0, 0.0, 40.0)];

/// Number of ticks each scripted animation takes.
pub const ANIMATION_STEPS: u32 = 50;

/// Ticks a die must be quiet before the roll may end.
pub const SETTLE_FRAMES: u32 = 50;

/// Per-axis tolerance for "the die has not moved".
pub const REST_TOLERANCE: f32 = 0.01;

/// Center-to-center distance under which animated dice are pushed apart.
pub const PROXIMITY_DISTANCE: f32 = 6.5;

/// Z separation the dice are pushed to when they get too close.
pub const PROXIMITY_SEPARATION: f32 = 7.0;

/// A die must be above this height for an x-reversal to count as a wall bump.
pub const WALL_BUMP_MIN_HEIGHT: f32 = 2.0;

/// Component attached to each die entity
#[derive(Component, Debug, Clone, Copy)]
pub struct Die {
    pub index: usize,
}

/// Marker component for the floor and wall planes
#[derive(Component)]
pub struct DiceStagePlane;

/// Raw pose of one die as reported by the physics world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiePose {
    pub position: Vec3,
    pub orientation: Quat,
}

/// Per-die tracking state owned by the roll controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieState {
    pub position: Vec3,
    pub previous_position: Vec3,
    /// Previous tick's x motion, truncated to whole units so sub-unit jitter
    /// never reads as a reversal.
    pub previous_delta_x: f32,
    /// Ticks since `new_angle` last fired.
    pub frames_since_bump: u32,
    /// Consecutive ticks the position stayed within `REST_TOLERANCE`.
    pub still_frames: u32,
    /// Set for exactly one tick when the die bounced off a wall.
    pub new_angle: bool,
}

impl DieState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            previous_position: position,
            previous_delta_x: 0.0,
            frames_since_bump: 0,
            still_frames: 0,
            new_angle: false,
        }
    }
}

/// Lazily compare two positions, axis by axis.
pub fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a.x - b.x).abs() < REST_TOLERANCE
        && (a.y - b.y).abs() < REST_TOLERANCE
        && (a.z - b.z).abs() < REST_TOLERANCE
}

/// Face values of the last settled roll.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DiceResults {
    pub values: Option<[u32; DIE_COUNT]>,
}

impl DiceResults {
    pub fn total(&self) -> Option<u32> {
        self.values.map(|v| v.iter().sum())
    }
}
