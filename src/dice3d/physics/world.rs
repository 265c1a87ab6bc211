//! Rapier-backed dice world
//!
//! One floor plane, two 45 degree wall planes and two dynamic boxes. The world
//! is stepped by a fixed delta per call, never by wall-clock time: the
//! bounce and impulse tuning was done against that cadence.

use bevy::log::debug;
use bevy::prelude::*;
use bevy_rapier3d::rapier::na::Unit;
use bevy_rapier3d::rapier::prelude::Real;
use bevy_rapier3d::rapier::prelude::*;
use rand::{Rng, RngCore};

use super::{DiceSimulation, SimError};
use crate::dice3d::types::{DiePose, PhysicsSettings, DIE_COUNT, PIVOT_Y_OFFSET, START_POSITIONS};

/// Owns every piece of the rapier pipeline.
///
/// Fields drop in declaration order, which is the reverse of the order
/// `new` builds them in: the solver structures go first, then the
/// colliders, then the bodies they are attached to.
pub struct DiceWorld {
    pipeline: PhysicsPipeline,
    ccd_solver: CCDSolver,
    multibody_joints: MultibodyJointSet,
    impulse_joints: ImpulseJointSet,
    narrow_phase: NarrowPhase,
    broad_phase: DefaultBroadPhase,
    islands: IslandManager,
    integration_parameters: IntegrationParameters,
    colliders: ColliderSet,
    bodies: RigidBodySet,
    dice: [RigidBodyHandle; DIE_COUNT],
    gravity: Vector<Real>,
    substeps: u32,
    settings: PhysicsSettings,
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

/// Draw the throw for die `die`: an impulse pushing it away from the camera
/// and toward the middle, and the off-center point it is applied at.
pub fn throw_impulse<R: Rng + ?Sized>(
    settings: &PhysicsSettings,
    die: usize,
    rng: &mut R,
) -> (Vec3, Vec3) {
    // Die 0 starts on the +x side, die 1 on the -x side.
    let side = if die == 0 { -1.0 } else { 1.0 };

    let x_max = settings.impulse_x_max.abs();
    let x = side * rng.gen_range(0.0..=x_max);

    let (z_lo, z_hi) = if settings.impulse_z_min <= settings.impulse_z_max {
        (settings.impulse_z_min, settings.impulse_z_max)
    } else {
        (settings.impulse_z_max, settings.impulse_z_min)
    };
    let z = rng.gen_range(z_lo..=z_hi);

    let [px, py, pz] = settings.impulse_point;
    let point = Vec3::new(px * -side, py, pz);

    (Vec3::new(x, 0.0, z), point)
}

/// Linear and angular velocity produced by applying `impulse` at `offset`
/// from the center of a solid box.
pub fn impulse_velocities(
    impulse: Vec3,
    offset: Vec3,
    mass: f32,
    half_extent: f32,
) -> (Vec3, Vec3) {
    let side = 2.0 * half_extent;
    let inertia = mass * side * side / 6.0;
    let linvel = impulse / mass;
    let angvel = offset.cross(impulse) / inertia;
    (linvel, angvel)
}

impl DiceWorld {
    pub fn new(settings: &PhysicsSettings, rng: &mut dyn RngCore) -> Self {
        debug!("Creating dice world");

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        // Floor, left wall, right wall.
        let diagonal = std::f32::consts::FRAC_1_SQRT_2;
        let planes = [
            (Vec3::Y, settings.floor_offset),
            (Vec3::new(diagonal, 0.0, diagonal), settings.wall_offset),
            (Vec3::new(-diagonal, 0.0, diagonal), settings.wall_offset),
        ];
        for (normal, offset) in planes {
            let collider = ColliderBuilder::halfspace(Unit::new_normalize(to_vector(normal)))
                .translation(to_vector(normal * offset))
                .restitution(settings.restitution)
                .restitution_combine_rule(CoefficientCombineRule::Multiply)
                .build();
            colliders.insert(collider);
        }

        let half = settings.die_half_extent;
        let dice = std::array::from_fn(|i| {
            let (impulse, point) = throw_impulse(settings, i, rng);
            let (linvel, angvel) = impulse_velocities(impulse, point, settings.die_mass, half);

            // Spawn where the start animation left the die, minus the render pivot.
            let spawn = START_POSITIONS[i] - Vec3::Y * PIVOT_Y_OFFSET;
            let body = RigidBodyBuilder::dynamic()
                .translation(to_vector(spawn))
                .linvel(to_vector(linvel))
                .angvel(to_vector(angvel))
                .build();
            let handle = bodies.insert(body);

            let collider = ColliderBuilder::cuboid(half, half, half)
                .mass(settings.die_mass)
                .restitution(settings.restitution)
                .restitution_combine_rule(CoefficientCombineRule::Multiply)
                .build();
            colliders.insert_with_parent(collider, handle, &mut bodies);

            debug!("Die {} thrown with impulse {:?} at {:?}", i, impulse, point);
            handle
        });

        let substeps = settings.substeps();
        let integration_parameters = IntegrationParameters {
            dt: settings.step_seconds / substeps as f32,
            ..IntegrationParameters::default()
        };
        let islands = IslandManager::new();
        let broad_phase = DefaultBroadPhase::new();
        let narrow_phase = NarrowPhase::new();
        let impulse_joints = ImpulseJointSet::new();
        let multibody_joints = MultibodyJointSet::new();
        let ccd_solver = CCDSolver::new();
        let pipeline = PhysicsPipeline::new();

        Self {
            pipeline,
            ccd_solver,
            multibody_joints,
            impulse_joints,
            narrow_phase,
            broad_phase,
            islands,
            integration_parameters,
            colliders,
            bodies,
            dice,
            gravity: to_vector(Vec3::from_array(settings.gravity)),
            substeps,
            settings: settings.clone(),
        }
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }

    /// Current linear velocity of a die, mostly useful to tests and tools.
    pub fn linear_velocity(&self, die: usize) -> Result<Vec3, SimError> {
        let handle = *self.dice.get(die).ok_or(SimError::UnknownDie(die))?;
        let body = self.bodies.get(handle).ok_or(SimError::MissingBody(die))?;
        let v = body.linvel();
        Ok(Vec3::new(v.x, v.y, v.z))
    }
}

impl DiceSimulation for DiceWorld {
    fn respawn(&mut self, rng: &mut dyn RngCore) {
        let settings = self.settings.clone();
        *self = DiceWorld::new(&settings, rng);
    }

    fn step(&mut self) {
        for _ in 0..self.substeps {
            self.pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                &(),
                &(),
            );
        }
    }

    fn pose(&self, die: usize) -> Result<DiePose, SimError> {
        let handle = *self.dice.get(die).ok_or(SimError::UnknownDie(die))?;
        let body = self.bodies.get(handle).ok_or(SimError::MissingBody(die))?;

        let iso = body.position();
        let t = iso.translation.vector;
        let r = iso.rotation;

        Ok(DiePose {
            position: Vec3::new(t.x, t.y, t.z),
            orientation: Quat::from_xyzw(r.i, r.j, r.k, r.w),
        })
    }
}

impl Drop for DiceWorld {
    fn drop(&mut self) {
        debug!("Destroying dice world");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_throw_impulse_ranges() {
        let settings = PhysicsSettings::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let (impulse, point) = throw_impulse(&settings, 0, &mut rng);
            assert!((-2.0..=0.0).contains(&impulse.x));
            assert!((-6.0..=-4.0).contains(&impulse.z));
            assert_eq!(impulse.y, 0.0);
            assert_eq!(point, Vec3::new(-4.0, 0.0, -4.0));

            let (impulse, point) = throw_impulse(&settings, 1, &mut rng);
            assert!((0.0..=2.0).contains(&impulse.x));
            assert!((-6.0..=-4.0).contains(&impulse.z));
            assert_eq!(point, Vec3::new(4.0, 0.0, -4.0));
        }
    }

    #[test]
    fn test_impulse_velocities_box_inertia() {
        // Side 6, mass 1.5: inertia 1.5 * 36 / 6 = 9.
        let (linvel, angvel) = impulse_velocities(
            Vec3::new(0.0, 0.0, -4.5),
            Vec3::new(4.0, 0.0, 0.0),
            1.5,
            3.0,
        );
        assert_eq!(linvel, Vec3::new(0.0, 0.0, -3.0));
        // (4,0,0) x (0,0,-4.5) = (0, 18, 0)
        assert!((angvel - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_new_world_places_dice_at_start() {
        let mut rng = StdRng::seed_from_u64(1);
        let world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
        for i in 0..DIE_COUNT {
            let pose = world.pose(i).unwrap();
            let expected = START_POSITIONS[i] - Vec3::Y * PIVOT_Y_OFFSET;
            assert!((pose.position - expected).length() < 1e-4);
        }
        assert_eq!(world.pose(2), Err(SimError::UnknownDie(2)));
    }

    #[test]
    fn test_step_applies_gravity() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
        let before = world.pose(0).unwrap().position;
        world.step();
        world.step();
        let after = world.pose(0).unwrap().position;
        assert!(after.y < before.y);
        assert!(world.linear_velocity(0).unwrap().y < 0.0);
    }

    #[test]
    fn test_bounces_multiply_restitution() {
        let mut rng = StdRng::seed_from_u64(3);
        let world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
        assert_eq!(world.colliders.len(), 5);
        for (_, collider) in world.colliders.iter() {
            assert_eq!(collider.restitution(), 0.85);
            assert_eq!(
                collider.restitution_combine_rule(),
                CoefficientCombineRule::Multiply
            );
        }
    }

    #[test]
    fn test_respawn_replaces_every_body() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut world = DiceWorld::new(&PhysicsSettings::default(), &mut rng);
        for _ in 0..5 {
            world.step();
            world.respawn(&mut rng);
            assert_eq!(world.bodies.len(), DIE_COUNT);
            assert_eq!(world.colliders.len(), 5);
        }
    }
}
