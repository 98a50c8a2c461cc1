use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::{FaceTable, D6_FACES, DIE_SIZE};

/// Build the d6 face quad, its cube collider and the face table both are laid
/// out from.
pub fn create_d6() -> (Mesh, Collider, &'static FaceTable) {
    let half = DIE_SIZE / 2.0;

    let face_quad = Mesh::from(Rectangle::new(DIE_SIZE, DIE_SIZE));
    let collider = Collider::cuboid(half, half, half);

    (face_quad, collider, &D6_FACES)
}
