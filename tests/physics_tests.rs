//! Tests for the rapier dice world

mod common;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use common::controller;
use dicestage::dice3d::physics::{
    impulse_velocities, throw_impulse, DiceSimulation, DiceWorld, SimError,
};
use dicestage::dice3d::types::{PhysicsSettings, PIVOT_Y_OFFSET, START_POSITIONS};

#[test]
fn test_world_starts_at_launch_positions() {
    let mut rng = StdRng::seed_from_u64(21);
    let world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);

    for (die, start) in START_POSITIONS.iter().enumerate() {
        let pose = world.pose(die).unwrap();
        assert!((pose.position + Vec3::Y * PIVOT_Y_OFFSET - *start).length() < 1e-4);
        assert!(pose.orientation.is_normalized());
    }
}

#[test]
fn test_unknown_die_is_an_error() {
    let mut rng = StdRng::seed_from_u64(21);
    let world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
    assert_eq!(world.pose(2), Err(SimError::UnknownDie(2)));
}

#[test]
fn test_dice_are_thrown_away_from_the_camera() {
    let mut rng = StdRng::seed_from_u64(4);
    let world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
    for die in 0..2 {
        assert!(world.linear_velocity(die).unwrap().z < 0.0);
    }
}

#[test]
fn test_throws_push_dice_toward_the_middle() {
    let settings = PhysicsSettings::default();
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..100 {
        // Die 0 sits at +x, die 1 at -x.
        assert!(throw_impulse(&settings, 0, &mut rng).0.x <= 0.0);
        assert!(throw_impulse(&settings, 1, &mut rng).0.x >= 0.0);
    }
}

#[test]
fn test_off_center_impulse_spins_the_die() {
    let (_, angvel) = impulse_velocities(
        Vec3::new(1.0, 0.0, -5.0),
        Vec3::new(-4.0, 0.0, -4.0),
        1.5,
        3.0,
    );
    assert!(angvel.length() > 0.0);
}

#[test]
fn test_same_seed_same_roll() {
    let settings = PhysicsSettings::default();
    let mut a = DiceWorld::new(&settings, &mut StdRng::seed_from_u64(99));
    let mut b = DiceWorld::new(&settings, &mut StdRng::seed_from_u64(99));
    for _ in 0..40 {
        a.step();
        b.step();
    }
    assert_eq!(a.pose(0).unwrap(), b.pose(0).unwrap());
    assert_eq!(a.pose(1).unwrap(), b.pose(1).unwrap());
}

#[test]
fn test_respawn_builds_a_fresh_world() {
    let mut rng = StdRng::seed_from_u64(17);
    let mut world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
    for _ in 0..30 {
        world.step();
    }
    world.respawn(&mut rng);

    let pose = world.pose(0).unwrap();
    assert!((pose.position + Vec3::Y * PIVOT_Y_OFFSET - START_POSITIONS[0]).length() < 1e-4);
}

#[test]
fn test_rendered_height_never_negative_while_rolling() {
    let mut rng = StdRng::seed_from_u64(2024);
    let world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
    let mut controller = controller(world);
    controller.reset_dice(&mut rng);

    let mut rolling_frames = 0;
    for _ in 0..600 {
        controller.dice_events().unwrap();
        if controller.phase().is_rolling() {
            rolling_frames += 1;
            for position in controller.die_positions() {
                assert!(position.is_finite());
                assert!(position.y >= 0.0, "die below the floor at {:?}", position);
            }
        }
    }
    assert!(rolling_frames > 0);
}
