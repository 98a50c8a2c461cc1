//! Dice-related types and components
//!
//! This module contains the face mapping table shared by the resolver and the
//! visual face layout, the outcome resolver itself, and the components that
//! tie a die's physics body to its visual.

use bevy::prelude::*;
use std::fmt;

/// Edge length of a die in world units.
pub const DIE_SIZE: f32 = 1.0;

/// A die's local face directions paired with their printed values.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTable {
    faces: [(Vec3, u32); 6],
}

/// Standard d6 layout. Opposite faces sum to 7.
pub const D6_FACES: FaceTable = FaceTable::new([
    (Vec3::Y, 6),
    (Vec3::NEG_Y, 1),
    (Vec3::X, 3),
    (Vec3::NEG_X, 4),
    (Vec3::Z, 2),
    (Vec3::NEG_Z, 5),
]);

impl FaceTable {
    pub const fn new(faces: [(Vec3, u32); 6]) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[(Vec3, u32); 6] {
        &self.faces
    }

    /// Value printed on the face at `index` in table order.
    pub fn value_at(&self, index: usize) -> Option<u32> {
        self.faces.get(index).map(|(_, value)| *value)
    }

    /// Local outward direction of the face showing `value`.
    pub fn direction_of(&self, value: u32) -> Option<Vec3> {
        self.faces
            .iter()
            .find(|(_, v)| *v == value)
            .map(|(direction, _)| *direction)
    }

    /// Check that the table is a valid d6: unit axis directions, every axis
    /// paired with its opposite, values a permutation of 1..=6 and opposite
    /// faces summing to 7.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = [false; 6];

        for (direction, value) in &self.faces {
            if !(1..=6).contains(value) {
                return Err(format!("Face value {} is outside 1..=6", value));
            }
            if seen[(*value - 1) as usize] {
                return Err(format!("Face value {} appears more than once", value));
            }
            seen[(*value - 1) as usize] = true;

            let is_axis = [Vec3::X, Vec3::Y, Vec3::Z]
                .iter()
                .any(|axis| direction.abs().abs_diff_eq(*axis, 1e-6));
            if !is_axis {
                return Err(format!("Face direction {} is not a unit axis", direction));
            }

            let opposite = self
                .faces
                .iter()
                .find(|(other, _)| other.abs_diff_eq(-*direction, 1e-6))
                .ok_or_else(|| format!("Face direction {} has no opposite", direction))?;
            if value + opposite.1 != 7 {
                return Err(format!(
                    "Opposite faces {} and {} do not sum to 7",
                    value, opposite.1
                ));
            }
        }

        Ok(())
    }
}

/// Determine the upward-facing value of a die from its world rotation.
///
/// Each face direction is rotated into world space and compared against +Y.
/// The first face with the largest dot product wins, so exact ties (a die
/// balanced on an edge) always resolve to the same value.
pub fn resolve_face(table: &FaceTable, rotation: Quat) -> u32 {
    let up = Vec3::Y;
    let mut best_match = table.faces[0].1;
    let mut best_dot = -2.0_f32;

    for (normal, value) in table.faces() {
        let world_normal = rotation * *normal;
        let dot = world_normal.dot(up);

        if dot > best_dot {
            best_dot = dot;
            best_match = *value;
        }
    }

    best_match
}

/// Identifies one die: the session that spawned it and its index within it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DieId {
    pub session: u64,
    pub index: u32,
}

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.session, self.index)
    }
}

/// A physics body paired with its visual for the lifetime of one roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DieRecord {
    pub id: DieId,
    pub body: Entity,
    pub visual: Entity,
    pub faces: &'static FaceTable,
}

/// Component on the rigid body entity of a die
#[derive(Component, Debug)]
pub struct DieBody {
    pub id: DieId,
}

/// Component on the visual root entity of a die
#[derive(Component, Debug)]
pub struct DieVisual {
    pub id: DieId,
}

/// Component on each textured face quad under a die visual
#[derive(Component, Debug)]
pub struct DieFace {
    pub value: u32,
}

/// Marker component for the static arena (floor, walls, ceiling)
#[derive(Component)]
pub struct DiceBox;
