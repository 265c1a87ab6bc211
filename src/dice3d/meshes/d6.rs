use bevy::prelude::*;

/// Outward face normals of the unrotated die and the value on that face.
pub const D6_FACES: [(Vec3, u32); 6] = [
    (Vec3::Y, 6),
    (Vec3::NEG_Y, 1),
    (Vec3::X, 3),
    (Vec3::NEG_X, 4),
    (Vec3::Z, 2),
    (Vec3::NEG_Z, 5),
];

pub fn create_d6(size: f32) -> (Mesh, Vec<(Vec3, u32)>) {
    let mesh = Mesh::from(Cuboid::new(size, size, size));
    (mesh, D6_FACES.to_vec())
}

/// Pip positions on a face, in grid units (-1, 0 or 1 per axis).
pub fn pip_layout(value: u32) -> &'static [(f32, f32)] {
    match value {
        1 => &[(0.0, 0.0)],
        2 => &[(-1.0, -1.0), (1.0, 1.0)],
        3 => &[(-1.0, -1.0), (0.0, 0.0), (1.0, 1.0)],
        4 => &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)],
        5 => &[(-1.0, -1.0), (-1.0, 1.0), (0.0, 0.0), (1.0, -1.0), (1.0, 1.0)],
        6 => &[(-1.0, -1.0), (-1.0, 0.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 0.0), (1.0, 1.0)],
        _ => &[],
    }
}

/// Every pip of a cube of side `size`, as (center, face normal). Pips sit just
/// proud of the face so they never z-fight with it.
pub fn pip_placements(size: f32) -> Vec<(Vec3, Vec3)> {
    let half = size / 2.0;
    let spacing = size * 0.25;

    D6_FACES
        .iter()
        .flat_map(|&(normal, value)| {
            let (u, v) = if normal.y != 0.0 {
                (Vec3::X, Vec3::Z)
            } else if normal.x != 0.0 {
                (Vec3::Y, Vec3::Z)
            } else {
                (Vec3::X, Vec3::Y)
            };
            pip_layout(value)
                .iter()
                .map(move |&(a, b)| (normal * half * 1.01 + (u * a + v * b) * spacing, normal))
        })
        .collect()
}

/// Value on the face pointing up for a die rotated by `rotation`.
pub fn face_up_value(rotation: Quat) -> u32 {
    let mut best_match = 1;
    let mut best_dot = -2.0_f32;

    for (normal, value) in D6_FACES {
        let dot = (rotation * normal).dot(Vec3::Y);
        if dot > best_dot {
            best_dot = dot;
            best_match = value;
        }
    }

    best_match
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_face_up_value_unrotated() {
        assert_eq!(face_up_value(Quat::IDENTITY), 6);
    }

    #[test]
    fn test_face_up_value_quarter_turns() {
        // +Z rotated a quarter turn about X points up.
        assert_eq!(face_up_value(Quat::from_rotation_x(-FRAC_PI_2)), 2);
        assert_eq!(face_up_value(Quat::from_rotation_x(FRAC_PI_2)), 5);
        // +X rotated a quarter turn about Z points up.
        assert_eq!(face_up_value(Quat::from_rotation_z(FRAC_PI_2)), 3);
        assert_eq!(face_up_value(Quat::from_rotation_z(std::f32::consts::PI)), 1);
    }

    #[test]
    fn test_pip_count() {
        assert_eq!(pip_placements(2.0).len(), 21);
        for (position, normal) in pip_placements(2.0) {
            assert!((position.dot(normal) - 1.01).abs() < 1e-5);
        }
    }
}
