//! Scripted stand-in for the physics world

#![allow(dead_code)]

use bevy::prelude::*;
use rand::RngCore;

use dicestage::dice3d::physics::{DiceSimulation, SimError};
use dicestage::dice3d::roll::RollController;
use dicestage::dice3d::types::{DiePose, PIVOT_Y_OFFSET};

pub const INITIAL_CAMERA: Vec3 = Vec3::new(0.0, 120.0, 120.0);
pub const FINAL_CAMERA: Vec3 = Vec3::new(0.0, 40.0, 40.0);

/// Plays back a fixed list of physics origins, one pair per step, then holds
/// the last pair. Every respawn rewinds the script.
pub struct ScriptedDice {
    script: Vec<[Vec3; 2]>,
    cursor: usize,
    current: [Vec3; 2],
    pub steps: u32,
    pub respawns: u32,
}

impl ScriptedDice {
    pub fn new(start: [Vec3; 2], script: Vec<[Vec3; 2]>) -> Self {
        Self {
            script,
            cursor: 0,
            current: start,
            steps: 0,
            respawns: 0,
        }
    }

    /// Dice that sit still with their rendered centers at `positions`.
    pub fn resting_at(positions: [Vec3; 2]) -> Self {
        let origins = positions.map(|p| p - Vec3::Y * PIVOT_Y_OFFSET);
        Self::new(origins, Vec::new())
    }
}

impl DiceSimulation for ScriptedDice {
    fn respawn(&mut self, _rng: &mut dyn RngCore) {
        self.cursor = 0;
        self.respawns += 1;
    }

    fn step(&mut self) {
        self.steps += 1;
        if let Some(next) = self.script.get(self.cursor) {
            self.current = *next;
            self.cursor += 1;
        }
    }

    fn pose(&self, die: usize) -> Result<DiePose, SimError> {
        let position = *self.current.get(die).ok_or(SimError::UnknownDie(die))?;
        Ok(DiePose {
            position,
            orientation: Quat::IDENTITY,
        })
    }
}

pub fn controller<S: DiceSimulation>(sim: S) -> RollController<S> {
    RollController::new(sim, INITIAL_CAMERA, FINAL_CAMERA)
}

/// Tick `n` times, panicking on a simulation error.
pub fn tick<S: DiceSimulation>(controller: &mut RollController<S>, n: u32) {
    for _ in 0..n {
        controller.dice_events().unwrap();
    }
}
