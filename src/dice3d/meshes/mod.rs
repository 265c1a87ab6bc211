pub mod d6;

pub use d6::{create_d6, face_up_value, pip_layout, pip_placements, D6_FACES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d6_has_6_faces() {
        let (_, face_normals) = create_d6(2.0);
        assert_eq!(face_normals.len(), 6, "D6 should have 6 face normals");
        for (_, value) in &face_normals {
            assert!(*value >= 1 && *value <= 6, "D6 face values should be 1-6");
        }
    }

    #[test]
    fn test_d6_opposite_faces_sum_to_seven() {
        for (normal, value) in D6_FACES {
            let opposite = D6_FACES
                .iter()
                .find(|(n, _)| *n == -normal)
                .map(|(_, v)| *v);
            assert_eq!(opposite.map(|v| v + value), Some(7));
        }
    }
}
