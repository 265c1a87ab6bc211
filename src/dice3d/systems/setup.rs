//! Scene setup system
//!
//! Spawns the camera, the lighting rig, the floor and walls, both dice and
//! the status text, and builds the roll controller with its physics world.

use bevy::prelude::*;

use crate::dice3d::meshes::{create_d6, pip_placements};
use crate::dice3d::physics::DiceWorld;
use crate::dice3d::presentation::{die_transform, PresentationDriver};
use crate::dice3d::roll::RollController;
use crate::dice3d::types::*;

use super::dice::DiceStage;

/// Side of the unit die mesh before `DIE_SCALE` is applied.
const DIE_MESH_SIZE: f32 = 2.0;

const POINT_LIGHTS: [Vec3; 6] = [
    Vec3::new(15.0, 150.0, 50.0),
    Vec3::new(0.0, 150.0, 50.0),
    Vec3::new(-15.0, 150.0, 50.0),
    Vec3::new(2.0, 150.0, 10.0),
    Vec3::new(0.0, 150.0, 10.0),
    Vec3::new(-2.0, 150.0, 10.0),
];

/// Spotlight position and direction. The direction points from the lit
/// surface back toward the light.
const SPOT_LIGHTS: [(Vec3, Vec3); 3] = [
    (Vec3::new(15.0, 150.0, 150.0), Vec3::new(-0.1, 0.5, 0.5)),
    (Vec3::new(0.0, 150.0, 150.0), Vec3::new(0.0, 0.5, 0.5)),
    (Vec3::new(-15.0, 150.0, 150.0), Vec3::new(0.1, 0.5, 0.5)),
];

fn material_for(color: &ColorSetting) -> StandardMaterial {
    StandardMaterial {
        base_color: color.to_color(),
        alpha_mode: if color.a < 1.0 { AlphaMode::Blend } else { AlphaMode::Opaque },
        perceptual_roughness: 0.4,
        ..default()
    }
}

/// Main setup system - initializes the entire 3D scene
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<StageSettings>,
    mut rng: ResMut<DiceRng>,
) {
    let camera_home = settings.camera.initial();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(camera_home).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));

    spawn_lights(&mut commands);
    spawn_planes(&mut commands, &mut meshes, &mut materials, &settings);

    // Dice
    let (die_mesh, _) = create_d6(DIE_MESH_SIZE);
    let die_mesh = meshes.add(die_mesh);
    let die_material = materials.add(material_for(&settings.colors.dice));
    let pip_mesh = meshes.add(Cylinder::new(DIE_MESH_SIZE * 0.08, DIE_MESH_SIZE * 0.01));
    let pip_material = materials.add(StandardMaterial {
        base_color: settings.colors.pips.to_color(),
        unlit: true,
        ..default()
    });

    let mut controller = RollController::new(
        DiceWorld::new(&settings.physics, &mut rng.0),
        camera_home,
        settings.camera.final_pos(),
    );
    let driver = PresentationDriver::seeded(&mut rng.0);
    let positions = controller.die_positions();

    for (index, position) in positions.into_iter().enumerate() {
        let rotation = driver.spin(index).map(|spin| spin.rotation).unwrap_or_default();
        commands
            .spawn((
                Mesh3d(die_mesh.clone()),
                MeshMaterial3d(die_material.clone()),
                die_transform(position, rotation),
                Die { index },
            ))
            .with_children(|parent| {
                for (offset, normal) in pip_placements(DIE_MESH_SIZE) {
                    parent.spawn((
                        Mesh3d(pip_mesh.clone()),
                        MeshMaterial3d(pip_material.clone()),
                        Transform::from_translation(offset)
                            .with_rotation(Quat::from_rotation_arc(Vec3::Y, normal)),
                    ));
                }
            });
    }

    // First throw starts straight away.
    controller.reset_dice(&mut rng.0);
    commands.insert_resource(DiceStage { controller, driver });

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        StatusText,
    ));

    info!("Dice stage ready");
}

fn spawn_lights(commands: &mut Commands) {
    for position in POINT_LIGHTS {
        commands.spawn((
            PointLight {
                intensity: 6_000_000.0,
                range: 400.0,
                ..default()
            },
            Transform::from_translation(position),
        ));
    }

    for (position, direction) in SPOT_LIGHTS {
        commands.spawn((
            SpotLight {
                intensity: 20_000_000.0,
                range: 400.0,
                outer_angle: 0.5,
                inner_angle: 0.35,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(position).looking_to(-direction, Vec3::Y),
        ));
    }

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
}

fn spawn_planes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    settings: &StageSettings,
) {
    let physics = &settings.physics;
    let diagonal = std::f32::consts::FRAC_1_SQRT_2;
    let floor_material = materials.add(material_for(&settings.colors.floor));
    let wall_material = materials.add(material_for(&settings.colors.walls));

    let planes = [
        (Vec3::Y, physics.floor_offset, floor_material),
        (Vec3::new(diagonal, 0.0, diagonal), physics.wall_offset, wall_material.clone()),
        (Vec3::new(-diagonal, 0.0, diagonal), physics.wall_offset, wall_material),
    ];

    for (normal, offset, material) in planes {
        commands.spawn((
            Mesh3d(meshes.add(Plane3d::new(normal, Vec2::splat(150.0)))),
            MeshMaterial3d(material),
            Transform::from_translation(normal * offset),
            DiceStagePlane,
        ));
    }
}
