//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice stage,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, planes, dice, status text)
//! - `dice`: Per-frame roll ticking and result recording
//! - `input`: Re-roll, pause, fullscreen and quit keys
//! - `camera`: Camera orbit, zoom, lift, reverse and reset (keyboard and mouse)

mod camera;
mod dice;
mod input;
mod setup;

pub use camera::{mouse_camera, rotate_camera};
pub use dice::{drive_dice, update_status_text, DiceStage};
pub use input::{handle_input, handle_quit, toggle_fullscreen, toggled_window_mode};
pub use setup::setup;
