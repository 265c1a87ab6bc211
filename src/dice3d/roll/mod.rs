//! Roll controller
//!
//! Wraps a [`DiceSimulation`] in the roll state machine:
//!
//! - `StartAnim`: camera and dice glide back to their launch positions
//! - `Rolling`: physics drives the dice until both have settled
//! - `EndAnim`: camera and dice glide to the reading positions
//! - `AtRest`: nothing moves until the next re-roll
//!
//! The controller is polled once per frame through [`RollController::dice_events`].

mod animation;
mod settle;

pub use animation::{separate, step_toward, ScriptedMove};
pub use settle::{is_quiet, remember, track};

use bevy::log::{debug, info};
use bevy::prelude::*;
use rand::RngCore;

use crate::dice3d::physics::{DiceSimulation, SimError};
use crate::dice3d::types::{
    DieState, ANIMATION_STEPS, DIE_COUNT, END_POSITIONS, PIVOT_Y_OFFSET, SESSION_OFFSETS,
    SETTLE_FRAMES, START_POSITIONS,
};

/// Which part of the roll is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPhase {
    /// Physics is running. `settle_frames` counts ticks since the roll began.
    Rolling { settle_frames: u32 },
    /// Scripted move back to the launch positions, `step` ticks done.
    StartAnim { step: u32 },
    /// Scripted move to the reading positions, `step` ticks done.
    EndAnim { step: u32 },
    AtRest,
}

impl RollPhase {
    pub fn is_rolling(&self) -> bool {
        matches!(self, RollPhase::Rolling { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            RollPhase::Rolling { .. } => "Rolling",
            RollPhase::StartAnim { .. } => "Starting",
            RollPhase::EndAnim { .. } => "Settling",
            RollPhase::AtRest => "At rest",
        }
    }
}

/// What one call to [`RollController::dice_events`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    /// Translation applied to the camera this tick.
    pub camera_delta: Vec3,
    /// The dice came to rest this tick and the end animation was set up.
    pub settled: bool,
    pub phase: RollPhase,
}

pub struct RollController<S: DiceSimulation> {
    sim: S,
    dice: [DieState; DIE_COUNT],
    camera_position: Vec3,
    initial_camera: Vec3,
    final_camera: Vec3,
    phase: RollPhase,
    motion: ScriptedMove,
    rolls: u32,
}

impl<S: DiceSimulation> RollController<S> {
    /// The dice start parked in front of the launch positions with the camera
    /// at `initial_camera`. Nothing moves until [`Self::reset_dice`].
    pub fn new(sim: S, initial_camera: Vec3, final_camera: Vec3) -> Self {
        debug!("Creating roll controller");
        Self {
            sim,
            dice: std::array::from_fn(|i| DieState::at(START_POSITIONS[i] + SESSION_OFFSETS[i])),
            camera_position: initial_camera,
            initial_camera,
            final_camera,
            phase: RollPhase::AtRest,
            motion: ScriptedMove::still(),
            rolls: 0,
        }
    }

    /// Throw again: rebuild the physics world with fresh impulses and start
    /// gliding the camera and dice back to the launch positions.
    pub fn reset_dice(&mut self, rng: &mut dyn RngCore) {
        self.sim.respawn(rng);

        for (state, start) in self.dice.iter_mut().zip(START_POSITIONS) {
            *state = DieState {
                previous_position: start,
                ..DieState::at(state.position)
            };
        }

        self.motion = ScriptedMove::toward(
            self.camera_position,
            self.initial_camera,
            self.die_positions(),
            START_POSITIONS,
        );
        self.phase = RollPhase::StartAnim { step: 0 };
        self.rolls += 1;
        info!("Roll {} started", self.rolls);
    }

    /// Advance the stage by one tick.
    pub fn dice_events(&mut self) -> Result<FrameUpdate, SimError> {
        let camera_before = self.camera_position;
        let mut settled = false;

        match self.phase {
            RollPhase::StartAnim { step } => {
                self.phase = if self.advance_motion(step) {
                    debug!("Start animation finished, handing over to physics");
                    RollPhase::Rolling { settle_frames: 0 }
                } else {
                    RollPhase::StartAnim { step: step + 1 }
                };
            }
            RollPhase::EndAnim { step } => {
                self.phase = if self.advance_motion(step) {
                    debug!("End animation finished");
                    RollPhase::AtRest
                } else {
                    RollPhase::EndAnim { step: step + 1 }
                };
            }
            RollPhase::Rolling { settle_frames } => {
                settled = self.physics_tick(settle_frames)?;
            }
            RollPhase::AtRest => {}
        }

        Ok(FrameUpdate {
            camera_delta: self.camera_position - camera_before,
            settled,
            phase: self.phase,
        })
    }

    /// One scripted tick. Returns true once the move is complete.
    fn advance_motion(&mut self, step: u32) -> bool {
        let completed = step + 1;
        let mut positions = self.die_positions();
        self.motion.advance(&mut self.camera_position, &mut positions, completed);
        for (state, position) in self.dice.iter_mut().zip(positions) {
            state.position = position;
        }
        completed >= ANIMATION_STEPS
    }

    fn physics_tick(&mut self, settle_frames: u32) -> Result<bool, SimError> {
        self.sim.step();

        for (i, state) in self.dice.iter_mut().enumerate() {
            let pose = self.sim.pose(i)?;
            track(state, pose.position + Vec3::Y * PIVOT_Y_OFFSET);
        }

        let settle_frames = settle_frames + 1;
        if settle_frames > SETTLE_FRAMES && self.dice.iter().all(is_quiet) {
            self.finish_roll(settle_frames);
            return Ok(true);
        }

        for state in &mut self.dice {
            remember(state);
        }
        self.phase = RollPhase::Rolling { settle_frames };
        Ok(false)
    }

    fn finish_roll(&mut self, frames: u32) {
        info!("Dice settled after {} frames", frames);
        self.motion = ScriptedMove::toward(
            self.camera_position,
            self.final_camera,
            self.die_positions(),
            END_POSITIONS,
        );
        self.phase = RollPhase::EndAnim { step: 0 };
    }

    pub fn phase(&self) -> RollPhase {
        self.phase
    }

    pub fn is_start_anim(&self) -> bool {
        matches!(self.phase, RollPhase::StartAnim { .. })
    }

    /// True from the moment the dice settle until the next re-roll.
    pub fn is_end_roll(&self) -> bool {
        matches!(self.phase, RollPhase::EndAnim { .. } | RollPhase::AtRest) && self.rolls > 0
    }

    pub fn die_positions(&self) -> [Vec3; DIE_COUNT] {
        std::array::from_fn(|i| self.dice[i].position)
    }

    pub fn die_state(&self, die: usize) -> Option<&DieState> {
        self.dice.get(die)
    }

    /// Whether die `die` bounced off a wall on the last tick.
    pub fn new_angle(&self, die: usize) -> bool {
        self.dice.get(die).is_some_and(|state| state.new_angle)
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    /// Tell the controller where the camera is now (the user may have moved it).
    pub fn set_camera_position(&mut self, position: Vec3) {
        self.camera_position = position;
    }

    pub fn initial_camera(&self) -> Vec3 {
        self.initial_camera
    }

    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::types::DiePose;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Dice that never move.
    struct Frozen;

    impl DiceSimulation for Frozen {
        fn respawn(&mut self, _rng: &mut dyn RngCore) {}
        fn step(&mut self) {}
        fn pose(&self, die: usize) -> Result<DiePose, SimError> {
            Ok(DiePose {
                position: END_POSITIONS[die],
                orientation: Quat::IDENTITY,
            })
        }
    }

    #[test]
    fn test_new_controller_is_idle() {
        let mut controller = RollController::new(
            Frozen,
            Vec3::new(0.0, 120.0, 120.0),
            Vec3::new(0.0, 40.0, 40.0),
        );
        assert_eq!(controller.phase(), RollPhase::AtRest);
        assert!(!controller.is_end_roll());
        assert_eq!(controller.die_positions()[0], Vec3::new(25.0, 30.0, 40.0));

        let update = controller.dice_events().unwrap();
        assert_eq!(update.camera_delta, Vec3::ZERO);
        assert!(!update.settled);
    }

    #[test]
    fn test_reset_enters_start_animation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut controller = RollController::new(
            Frozen,
            Vec3::new(0.0, 120.0, 120.0),
            Vec3::new(0.0, 40.0, 40.0),
        );
        controller.reset_dice(&mut rng);
        assert!(controller.is_start_anim());
        assert_eq!(controller.rolls(), 1);
        assert_eq!(controller.die_state(0).map(|s| s.previous_position), Some(START_POSITIONS[0]));
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(RollPhase::AtRest.name(), "At rest");
        assert!(RollPhase::Rolling { settle_frames: 3 }.is_rolling());
        assert!(!RollPhase::EndAnim { step: 3 }.is_rolling());
    }
}
