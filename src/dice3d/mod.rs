pub mod meshes;
pub mod physics;
pub mod presentation;
pub mod roll;
pub mod systems;
pub mod types;

pub use meshes::*;
pub use physics::*;
pub use presentation::*;
pub use roll::*;
pub use systems::*;
pub use types::*;

use bevy::prelude::*;

/// Everything the dice stage needs on top of `DefaultPlugins`.
pub struct DiceStagePlugin {
    pub settings: StageSettings,
    pub quit: QuitFlag,
}

impl Plugin for DiceStagePlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone();

        app.insert_resource(ClearColor(settings.colors.background.to_color()))
            .insert_resource(DiceRng::new(settings.seed))
            .insert_resource(CameraRig::new(settings.camera.initial()))
            .insert_resource(PauseState::default())
            .insert_resource(DiceResults::default())
            .insert_resource(self.quit.clone())
            .insert_resource(settings)
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    handle_input,
                    toggle_fullscreen,
                    drive_dice,
                    rotate_camera,
                    mouse_camera,
                    update_status_text,
                    handle_quit,
                )
                    .chain(),
            );
    }
}
