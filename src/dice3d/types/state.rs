//! Process-wide runtime state shared between systems
//!
//! The quit flag, the pause toggle and the single random generator the
//! stage draws impulses and spin angles from.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "stop now" flag. Cloning hands out another handle to the same flag,
/// so it can be passed explicitly into any loop that must observe it.
#[derive(Resource, Debug, Clone, Default)]
pub struct QuitFlag(Arc<AtomicBool>);

impl QuitFlag {
    pub fn request(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// When paused the dice freeze in place; the camera still moves.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseState {
    pub paused: bool,
}

/// The stage's random generator, seeded once at startup.
#[derive(Resource)]
pub struct DiceRng(pub StdRng);

impl DiceRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}
