//! Types module for dice3d
//!
//! This module contains all the type definitions for the dice stage,
//! organized into submodules:
//!
//! - `dice`: Stage geometry constants, `Die` component, per-die tracking state
//! - `camera`: Camera marker and orbit/zoom rig
//! - `settings`: Serde-backed stage configuration
//! - `state`: Quit flag, pause toggle and the shared random generator

mod camera;
mod dice;
mod settings;
mod state;

pub use camera::*;
pub use dice::*;
pub use settings::*;
pub use state::*;

/// Marker for the on-screen status text
#[derive(bevy::prelude::Component)]
pub struct StatusText;
