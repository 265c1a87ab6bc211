//! Scripted moves for the start and end of a roll
//!
//! A move is a constant per-tick step for the camera and each die, worked out
//! once when the move begins. Dice that drift too close during a move are
//! pushed apart and then re-aimed at their targets.

use bevy::prelude::*;

use crate::dice3d::types::{
    approx_eq, ANIMATION_STEPS, DIE_COUNT, PROXIMITY_DISTANCE, PROXIMITY_SEPARATION,
};

/// Per-tick step that takes `from` to `to` in `steps` ticks. Already there
/// (within tolerance) or no ticks left means no motion.
pub fn step_toward(from: Vec3, to: Vec3, steps: u32) -> Vec3 {
    if steps == 0 || approx_eq(from, to) {
        return Vec3::ZERO;
    }
    (to - from) / steps as f32
}

/// Push the dice apart along z until they are `PROXIMITY_SEPARATION` apart
/// on that axis, keeping their midpoint. Returns whether a push happened.
pub fn separate(dice: &mut [Vec3; DIE_COUNT]) -> bool {
    if dice[0].distance(dice[1]) >= PROXIMITY_DISTANCE {
        return false;
    }
    let direction = if dice[1].z >= dice[0].z { 1.0 } else { -1.0 };
    let middle = (dice[0].z + dice[1].z) / 2.0;
    let half = PROXIMITY_SEPARATION / 2.0;
    dice[0].z = middle - direction * half;
    dice[1].z = middle + direction * half;
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedMove {
    pub camera_step: Vec3,
    pub dice_steps: [Vec3; DIE_COUNT],
    pub dice_targets: [Vec3; DIE_COUNT],
    /// Set while the dice are being held apart.
    pub correcting: bool,
}

impl ScriptedMove {
    pub fn still() -> Self {
        Self {
            camera_step: Vec3::ZERO,
            dice_steps: [Vec3::ZERO; DIE_COUNT],
            dice_targets: [Vec3::ZERO; DIE_COUNT],
            correcting: false,
        }
    }

    pub fn toward(
        camera: Vec3,
        camera_target: Vec3,
        dice: [Vec3; DIE_COUNT],
        dice_targets: [Vec3; DIE_COUNT],
    ) -> Self {
        Self {
            camera_step: step_toward(camera, camera_target, ANIMATION_STEPS),
            dice_steps: std::array::from_fn(|i| {
                step_toward(dice[i], dice_targets[i], ANIMATION_STEPS)
            }),
            dice_targets,
            correcting: false,
        }
    }

    /// Re-aim the dice at their targets over the ticks left. The camera keeps
    /// its original step.
    pub fn recenter(&mut self, dice: [Vec3; DIE_COUNT], remaining: u32) {
        for (i, die) in dice.iter().enumerate() {
            self.dice_steps[i] = step_toward(*die, self.dice_targets[i], remaining);
        }
    }

    /// Apply one tick of the move to the camera and dice. `completed` is the
    /// number of ticks done including this one.
    pub fn advance(&mut self, camera: &mut Vec3, dice: &mut [Vec3; DIE_COUNT], completed: u32) {
        *camera += self.camera_step;
        for (die, step) in dice.iter_mut().zip(self.dice_steps) {
            *die += step;
        }

        if separate(dice) {
            self.correcting = true;
        } else if self.correcting {
            self.correcting = false;
            self.recenter(*dice, ANIMATION_STEPS.saturating_sub(completed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward() {
        let step = step_toward(Vec3::ZERO, Vec3::new(50.0, 0.0, -100.0), 50);
        assert_eq!(step, Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(step_toward(Vec3::ONE, Vec3::ONE + Vec3::splat(0.005), 50), Vec3::ZERO);
        assert_eq!(step_toward(Vec3::ZERO, Vec3::X, 0), Vec3::ZERO);
    }

    #[test]
    fn test_separate_keeps_midpoint() {
        let mut dice = [Vec3::new(0.0, 3.0, 1.0), Vec3::new(2.0, 3.0, 2.0)];
        assert!(separate(&mut dice));
        assert!((dice[1].z - dice[0].z - PROXIMITY_SEPARATION).abs() < 1e-5);
        assert!(((dice[0].z + dice[1].z) / 2.0 - 1.5).abs() < 1e-5);
        assert!(dice[0].distance(dice[1]) >= PROXIMITY_DISTANCE);
    }

    #[test]
    fn test_separate_ignores_distant_dice() {
        let mut dice = [Vec3::new(7.0, 3.0, 0.0), Vec3::new(-7.0, 3.0, 0.0)];
        assert!(!separate(&mut dice));
        assert_eq!(dice, [Vec3::new(7.0, 3.0, 0.0), Vec3::new(-7.0, 3.0, 0.0)]);
    }

    #[test]
    fn test_recenter_after_correction() {
        let targets = [Vec3::new(7.0, 3.0, 0.0), Vec3::new(-7.0, 3.0, 0.0)];
        let mut dice = [Vec3::new(1.0, 3.0, 0.0), Vec3::new(-1.0, 3.0, 0.0)];
        let mut camera = Vec3::ZERO;
        let mut motion = ScriptedMove::toward(camera, Vec3::ZERO, dice, targets);

        motion.advance(&mut camera, &mut dice, 1);
        assert!(motion.correcting);

        // Clear of each other now: re-aimed at the targets over 48 ticks.
        dice = [Vec3::new(1.0, 3.0, -10.0), Vec3::new(-1.0, 3.0, 10.0)];
        motion.dice_steps = [Vec3::ZERO; DIE_COUNT];
        motion.advance(&mut camera, &mut dice, 2);
        assert!(!motion.correcting);
        let expected = (targets[0] - dice[0]) / 48.0;
        assert!((motion.dice_steps[0] - expected).length() < 1e-5);
    }
}
