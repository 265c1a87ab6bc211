//! Dice Stage
//!
//! Two physically simulated dice rolled across a small stage: rapier drives
//! the tumble, a roll controller decides when the dice have settled, and
//! scripted moves bring the camera and dice into a readable final pose.

pub mod dice3d;
pub mod headless;
