//! Rigid-body simulation of the two dice
//!
//! The roll controller only talks to the physics through [`DiceSimulation`],
//! so scripted worlds can stand in for the real one in tests and tools.

mod world;

pub use world::{impulse_velocities, throw_impulse, DiceWorld};

use rand::RngCore;
use std::fmt;

use crate::dice3d::types::DiePose;

/// A physics world holding exactly two dice.
pub trait DiceSimulation {
    /// Tear down the current world and build a fresh one with new random
    /// impulses. Nothing from the old world survives.
    fn respawn(&mut self, rng: &mut dyn RngCore);

    /// Advance the world by one fixed step.
    fn step(&mut self);

    /// Raw pose of die `die` (0 or 1) after the last step.
    fn pose(&self, die: usize) -> Result<DiePose, SimError>;
}

/// Errors the physics world can report. All of them are fatal to the stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Asked for a die index outside `0..DIE_COUNT`.
    UnknownDie(usize),
    /// The die's rigid body is no longer in the world.
    MissingBody(usize),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownDie(i) => write!(f, "No die with index {} on the stage", i),
            SimError::MissingBody(i) => {
                write!(f, "Rigid body for die {} is missing from the physics world", i)
            }
        }
    }
}

impl std::error::Error for SimError {}
