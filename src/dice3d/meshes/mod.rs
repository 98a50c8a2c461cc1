pub mod d6;

use bevy::prelude::*;

pub use d6::create_d6;

/// Mesh handles shared by every die visual.
#[derive(Resource, Clone)]
pub struct DieAssets {
    pub face_quad: Handle<Mesh>,
}

pub fn init_die_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let (face_quad, _, _) = create_d6();
    commands.insert_resource(DieAssets {
        face_quad: meshes.add(face_quad),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::types::{resolve_face, DIE_SIZE};

    #[test]
    fn test_d6_has_6_faces() {
        let (_, _, faces) = create_d6();
        assert_eq!(faces.faces().len(), 6, "D6 should have 6 face normals");
        for (_, value) in faces.faces() {
            assert!(*value >= 1 && *value <= 6, "D6 face values should be 1-6");
        }
    }

    #[test]
    fn test_d6_collider_is_unit_cube() {
        let (_, collider, _) = create_d6();
        let cuboid = collider.as_cuboid().expect("d6 collider should be a cuboid");
        assert_eq!(cuboid.half_extents(), Vec3::splat(DIE_SIZE / 2.0));
    }

    #[test]
    fn test_face_quads_match_resolver() {
        // A face quad placed along a table normal must show that value on top
        // when the die is rotated so the normal points up.
        let (_, _, faces) = create_d6();
        for (normal, value) in faces.faces() {
            let up_rotation = Quat::from_rotation_arc(*normal, Vec3::Y);
            assert_eq!(resolve_face(faces, up_rotation), *value);

            let quad_rotation = Quat::from_rotation_arc(Vec3::Z, *normal);
            assert!((quad_rotation * Vec3::Z).abs_diff_eq(*normal, 1e-5));
        }
    }
}
