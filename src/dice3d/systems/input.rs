//! Input handling systems
//!
//! Keyboard controls for re-rolling, pausing, fullscreen and quitting.

use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use crate::dice3d::types::*;

use super::dice::DiceStage;

/// Handle keyboard input for rolling, pausing and quitting
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut stage: ResMut<DiceStage>,
    mut rng: ResMut<DiceRng>,
    mut pause: ResMut<PauseState>,
    mut results: ResMut<DiceResults>,
    quit: Res<QuitFlag>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        let DiceStage { controller, driver } = &mut *stage;
        controller.reset_dice(&mut rng.0);
        driver.reroll(&mut rng.0);
        results.values = None;
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        pause.paused = !pause.paused;
        info!("Dice {}", if pause.paused { "paused" } else { "resumed" });
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        quit.request();
    }
}

/// Close the app once anything has raised the quit flag.
pub fn handle_quit(quit: Res<QuitFlag>, mut exit: MessageWriter<AppExit>) {
    if quit.is_requested() {
        info!("Quit requested");
        exit.write(AppExit::Success);
    }
}

/// The mode Alt+Enter switches to from `mode`.
pub fn toggled_window_mode(mode: WindowMode) -> WindowMode {
    match mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    }
}

/// Alt+Enter switches between windowed and borderless fullscreen.
pub fn toggle_fullscreen(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    let alt = keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]);
    if !alt || !keyboard.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        return;
    }

    if let Ok(mut window) = window_query.single_mut() {
        window.mode = toggled_window_mode(window.mode);
        debug!("Window mode now {:?}", window.mode);
    }
}
