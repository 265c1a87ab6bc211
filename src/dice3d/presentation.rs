//! Per-frame dice presentation
//!
//! Physics only supplies where the dice are. How they are turned is a visual
//! spin kept here: each die tumbles by a small Euler increment per frame,
//! the tumble dies down as the die nears the floor, reverses when it hits a
//! wall, and snaps to the nearest quarter turn once the die has landed.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::dice3d::meshes::face_up_value;
use crate::dice3d::physics::DiceSimulation;
use crate::dice3d::roll::RollController;
use crate::dice3d::types::{DIE_COUNT, DIE_SCALE};

/// Below this height the spin starts to die down.
pub const SPIN_DAMPING_HEIGHT: f32 = 7.0;

/// Once a die has been low for this many frames it is snapped face up.
pub const SNAP_BOUNCES: u32 = 10;

/// Upper bound (exclusive) of a random per-frame spin increment, per axis.
pub const MAX_SPIN_INCREMENT: f32 = 0.031_415_9;

/// Round each Euler angle to the nearest quarter turn.
pub fn face_up(rotation: Vec3) -> Vec3 {
    let snap = |angle: f32| ((angle / FRAC_PI_2).round() as i32 % 4) as f32 * FRAC_PI_2;
    Vec3::new(snap(rotation.x), snap(rotation.y), snap(rotation.z))
}

/// Wrap each angle into (-2π, 2π). NaN becomes 0.
pub fn wrap_rotation(rotation: Vec3) -> Vec3 {
    let wrap = |angle: f32| {
        let wrapped = angle % TAU;
        if wrapped.is_nan() {
            0.0
        } else {
            wrapped
        }
    };
    Vec3::new(wrap(rotation.x), wrap(rotation.y), wrap(rotation.z))
}

/// Rx · Ry · Rz, applied in that order to the die's local axes.
pub fn euler_quat(rotation: Vec3) -> Quat {
    Quat::from_rotation_x(rotation.x)
        * Quat::from_rotation_y(rotation.y)
        * Quat::from_rotation_z(rotation.z)
}

/// Model matrix for a die: translate, scale by `DIE_SCALE`, then rotate.
pub fn model_matrix(position: Vec3, rotation: Vec3) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_scale(Vec3::splat(DIE_SCALE))
        * Mat4::from_rotation_x(rotation.x)
        * Mat4::from_rotation_y(rotation.y)
        * Mat4::from_rotation_z(rotation.z)
}

pub fn die_transform(position: Vec3, rotation: Vec3) -> Transform {
    Transform {
        translation: position,
        rotation: euler_quat(rotation),
        scale: Vec3::splat(DIE_SCALE),
    }
}

fn random_increment<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(0.0..MAX_SPIN_INCREMENT),
        rng.gen_range(0.0..MAX_SPIN_INCREMENT),
        rng.gen_range(0.0..MAX_SPIN_INCREMENT),
    )
}

/// Visual spin of one die.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieSpin {
    pub rotation: Vec3,
    pub increment: Vec3,
    pub bounce: u32,
}

impl Default for DieSpin {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            increment: Vec3::ZERO,
            bounce: 1,
        }
    }
}

impl DieSpin {
    /// One frame of tumbling while physics drives the die at `height`.
    pub fn advance(&mut self, height: f32, new_angle: bool) {
        let mut applied = self.increment;

        if height < SPIN_DAMPING_HEIGHT {
            applied /= self.bounce.max(1) as f32;
            self.bounce += 1;
            if self.bounce > SNAP_BOUNCES {
                self.rotation = face_up(self.rotation);
            }
        } else {
            self.bounce = 1;
        }

        if new_angle {
            self.increment = -self.increment;
            applied = -applied;
        }

        self.rotation = wrap_rotation(self.rotation + applied);
    }
}

/// Turns controller state into per-die transforms each frame.
#[derive(Debug, Clone, Default)]
pub struct PresentationDriver {
    spins: [DieSpin; DIE_COUNT],
}

impl PresentationDriver {
    /// Random face-up starting orientation and a fresh spin for both dice.
    pub fn seeded<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let spins = std::array::from_fn(|_| {
            let rotation = Vec3::new(
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
            );
            DieSpin {
                rotation: face_up(rotation),
                increment: random_increment(rng),
                bounce: 1,
            }
        });
        Self { spins }
    }

    /// New throw: new spin increments, starting already slightly damped.
    pub fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for spin in &mut self.spins {
            spin.bounce = 2;
            spin.increment = random_increment(rng);
        }
    }

    /// Poll the controller's latest state and lay out both dice.
    pub fn update<S: DiceSimulation>(
        &mut self,
        controller: &RollController<S>,
    ) -> [Transform; DIE_COUNT] {
        let positions = controller.die_positions();
        let rolling = controller.phase().is_rolling();

        for (i, spin) in self.spins.iter_mut().enumerate() {
            if rolling {
                spin.advance(positions[i].y, controller.new_angle(i));
            } else {
                spin.rotation = face_up(spin.rotation);
            }
        }

        std::array::from_fn(|i| die_transform(positions[i], self.spins[i].rotation))
    }

    pub fn spin(&self, die: usize) -> Option<&DieSpin> {
        self.spins.get(die)
    }

    pub fn spin_mut(&mut self, die: usize) -> Option<&mut DieSpin> {
        self.spins.get_mut(die)
    }

    /// Face value showing on each die, read from the snapped orientation.
    pub fn read_face_values(&self) -> [u32; DIE_COUNT] {
        std::array::from_fn(|i| face_up_value(euler_quat(face_up(self.spins[i].rotation))))
    }

    pub fn model_matrices<S: DiceSimulation>(
        &self,
        controller: &RollController<S>,
    ) -> [Mat4; DIE_COUNT] {
        let positions = controller.die_positions();
        std::array::from_fn(|i| model_matrix(positions[i], self.spins[i].rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_face_up_snaps_to_quarter_turns() {
        let snapped = face_up(Vec3::new(0.7, 1.6, -3.0));
        assert_eq!(snapped, Vec3::new(0.0, FRAC_PI_2, -2.0 * FRAC_PI_2));
        // Five quarter turns wrap to one.
        assert!((face_up(Vec3::splat(5.0 * FRAC_PI_2)).x - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_clamps_nan() {
        let wrapped = wrap_rotation(Vec3::new(f32::NAN, 7.0, -7.0));
        assert_eq!(wrapped.x, 0.0);
        assert!((wrapped.y - (7.0 - TAU)).abs() < 1e-5);
        assert!((wrapped.z + (7.0 - TAU)).abs() < 1e-5);
    }

    #[test]
    fn test_spin_resets_bounce_up_high() {
        let mut spin = DieSpin {
            rotation: Vec3::ZERO,
            increment: Vec3::splat(0.02),
            bounce: 5,
        };
        spin.advance(20.0, false);
        assert_eq!(spin.bounce, 1);
        assert!((spin.rotation - Vec3::splat(0.02)).length() < 1e-6);
    }

    #[test]
    fn test_spin_damps_near_floor() {
        let mut spin = DieSpin {
            rotation: Vec3::ZERO,
            increment: Vec3::splat(0.02),
            bounce: 2,
        };
        spin.advance(4.0, false);
        assert_eq!(spin.bounce, 3);
        assert!((spin.rotation - Vec3::splat(0.01)).length() < 1e-6);
        // The stored increment is left alone.
        assert_eq!(spin.increment, Vec3::splat(0.02));
    }

    #[test]
    fn test_wall_bump_reverses_spin() {
        let mut spin = DieSpin {
            rotation: Vec3::splat(1.0),
            increment: Vec3::splat(0.02),
            bounce: 1,
        };
        spin.advance(20.0, true);
        assert_eq!(spin.increment, Vec3::splat(-0.02));
        assert!((spin.rotation - Vec3::splat(0.98)).length() < 1e-6);
    }

    #[test]
    fn test_seeded_dice_start_face_up() {
        let mut rng = StdRng::seed_from_u64(11);
        let driver = PresentationDriver::seeded(&mut rng);
        for i in 0..DIE_COUNT {
            let spin = driver.spin(i).unwrap();
            assert_eq!(face_up(spin.rotation), spin.rotation);
            assert!(spin.increment.max_element() < MAX_SPIN_INCREMENT);
            assert!(spin.increment.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_transform_matches_model_matrix() {
        let position = Vec3::new(7.0, 3.0, 0.0);
        let rotation = Vec3::new(0.3, -1.2, 2.0);
        let t = die_transform(position, rotation);
        let from_transform =
            Mat4::from_scale_rotation_translation(t.scale, t.rotation, t.translation);
        assert!(from_transform.abs_diff_eq(model_matrix(position, rotation), 1e-4));
    }
}
