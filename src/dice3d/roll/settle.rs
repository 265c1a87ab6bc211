//! Per-die bookkeeping while physics drives the dice
//!
//! Tracks wall bumps (an x reversal while airborne) and how long each die
//! has stayed put, which together decide when a roll is over.

use bevy::prelude::*;

use crate::dice3d::types::{approx_eq, DieState, SETTLE_FRAMES, WALL_BUMP_MIN_HEIGHT};

/// Record the die's new position for this tick.
pub fn track(state: &mut DieState, position: Vec3) {
    state.position = position;

    let delta_x = position.x - state.previous_position.x;
    let reversed = (delta_x > 0.0 && state.previous_delta_x < 0.0)
        || (delta_x < 0.0 && state.previous_delta_x > 0.0);

    if !state.new_angle
        && state.frames_since_bump > SETTLE_FRAMES
        && reversed
        && position.y > WALL_BUMP_MIN_HEIGHT
    {
        state.new_angle = true;
        state.frames_since_bump = 0;
    } else {
        state.new_angle = false;
        state.frames_since_bump += 1;
    }

    if approx_eq(position, state.previous_position) {
        state.still_frames += 1;
    } else {
        state.still_frames = 0;
    }
}

/// No recent bump and no movement for long enough.
pub fn is_quiet(state: &DieState) -> bool {
    !state.new_angle
        && state.frames_since_bump > SETTLE_FRAMES
        && state.still_frames >= SETTLE_FRAMES
}

/// Carry this tick's motion over as the reference for the next one.
pub fn remember(state: &mut DieState) {
    state.previous_delta_x = (state.position.x - state.previous_position.x).trunc();
    state.previous_position = state.position;
}
