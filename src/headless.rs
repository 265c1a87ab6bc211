//! Windowless rolls
//!
//! Runs the same controller and spin driver as the 3D stage, but nothing is
//! drawn: each roll is ticked until the dice come to rest and reported.

use rand::RngCore;
use serde::Serialize;

use crate::dice3d::physics::{DiceSimulation, DiceWorld, SimError};
use crate::dice3d::presentation::PresentationDriver;
use crate::dice3d::roll::{RollController, RollPhase};
use crate::dice3d::types::{DiceRng, QuitFlag, StageSettings, DIE_COUNT};

/// Outcome of one headless roll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollReport {
    pub roll: u32,
    /// Ticks run, start and end animations included.
    pub frames: u32,
    /// Tick on which the dice came to rest, if they did.
    pub settled_at: Option<u32>,
    pub positions: [[f32; 3]; DIE_COUNT],
    pub faces: Option<[u32; DIE_COUNT]>,
    pub total: Option<u32>,
}

/// Throw once and tick until the dice are at rest, `max_frames` have passed,
/// or `quit` is raised.
pub fn simulate_roll<S: DiceSimulation>(
    controller: &mut RollController<S>,
    driver: &mut PresentationDriver,
    rng: &mut dyn RngCore,
    max_frames: u32,
    quit: &QuitFlag,
) -> Result<RollReport, SimError> {
    controller.reset_dice(rng);
    driver.reroll(rng);

    let mut frames = 0;
    let mut settled_at = None;
    let mut faces = None;

    while frames < max_frames && !quit.is_requested() {
        let update = controller.dice_events()?;
        driver.update(controller);
        frames += 1;

        if update.settled {
            settled_at = Some(frames);
            faces = Some(driver.read_face_values());
        }
        if update.phase == RollPhase::AtRest {
            break;
        }
    }

    Ok(RollReport {
        roll: controller.rolls(),
        frames,
        settled_at,
        positions: controller.die_positions().map(|p| p.to_array()),
        faces,
        total: faces.map(|f| f.iter().sum()),
    })
}

/// Roll `rolls` times on a fresh rapier world built from `settings`.
pub fn run(
    settings: &StageSettings,
    rolls: u32,
    max_frames: u32,
    quit: &QuitFlag,
) -> Result<Vec<RollReport>, SimError> {
    let mut rng = DiceRng::new(settings.seed);
    let world = DiceWorld::new(&settings.physics, &mut rng.0);
    let mut controller = RollController::new(
        world,
        settings.camera.initial(),
        settings.camera.final_pos(),
    );
    let mut driver = PresentationDriver::seeded(&mut rng.0);

    let mut reports = Vec::new();
    for _ in 0..rolls {
        if quit.is_requested() {
            break;
        }
        reports.push(simulate_roll(&mut controller, &mut driver, &mut rng.0, max_frames, quit)?);
    }
    Ok(reports)
}
