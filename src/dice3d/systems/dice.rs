//! Dice driving systems
//!
//! This module contains the per-frame system that ticks the roll controller,
//! places the dice and camera, and records the face values once a roll ends.

use bevy::prelude::*;

use crate::dice3d::physics::DiceWorld;
use crate::dice3d::presentation::PresentationDriver;
use crate::dice3d::roll::RollController;
use crate::dice3d::types::*;

/// The roll controller with its physics world, and the visual spin driver.
#[derive(Resource)]
pub struct DiceStage {
    pub controller: RollController<DiceWorld>,
    pub driver: PresentationDriver,
}

/// Tick the controller once and apply the result to the scene.
pub fn drive_dice(
    mut stage: ResMut<DiceStage>,
    pause: Res<PauseState>,
    rig: Res<CameraRig>,
    mut results: ResMut<DiceResults>,
    mut camera_query: Query<&mut Transform, (With<MainCamera>, Without<Die>)>,
    mut dice_query: Query<(&Die, &mut Transform), Without<MainCamera>>,
    mut exit: MessageWriter<AppExit>,
) {
    if pause.paused {
        return;
    }

    let DiceStage { controller, driver } = &mut *stage;

    if let Ok(camera) = camera_query.single() {
        controller.set_camera_position(camera.translation);
    }

    let update = match controller.dice_events() {
        Ok(update) => update,
        Err(err) => {
            error!("Dice simulation failed: {}", err);
            exit.write(AppExit::error());
            return;
        }
    };

    if update.camera_delta != Vec3::ZERO {
        for mut transform in camera_query.iter_mut() {
            transform.translation = controller.camera_position();
            *transform = transform.looking_at(rig.target, Vec3::Y);
        }
    }

    let transforms = driver.update(controller);
    for (die, mut transform) in dice_query.iter_mut() {
        if let Some(next) = transforms.get(die.index) {
            *transform = *next;
        }
    }

    if update.settled {
        let values = driver.read_face_values();
        info!("Rolled {} and {} (total {})", values[0], values[1], values[0] + values[1]);
        results.values = Some(values);
    }
}

const CONTROLS_HELP: &str = "SPACE: Roll again  P: Pause  ESC: Quit\n\
    A/D, W/S, R/F or drag and wheel: Camera  X: Reverse  Z: Reset  Alt+Enter: Fullscreen";

/// System to update the status text
pub fn update_status_text(
    stage: Res<DiceStage>,
    results: Res<DiceResults>,
    pause: Res<PauseState>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    let phase = if pause.paused {
        "Paused"
    } else {
        stage.controller.phase().name()
    };

    let result_line = match results.values {
        Some([a, b]) => format!("Result: {} + {} = {}", a, b, a + b),
        None => String::from("Result: -"),
    };

    for mut text in text_query.iter_mut() {
        text.0 = format!(
            "Roll {}  |  {}\n{}\n\n{}",
            stage.controller.rolls(),
            phase,
            result_line,
            CONTROLS_HELP
        );
    }
}
