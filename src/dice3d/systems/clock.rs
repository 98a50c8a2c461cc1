//! Simulation clock
//!
//! Rapier steps the world once per frame with a fixed delta. After its
//! writeback, every active die's visual is moved onto its body.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Fixed physics step, one per rendered frame.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Heavier than earth gravity so dice feel snappy.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.82 * 4.0, 0.0);

pub fn fixed_timestep() -> TimestepMode {
    TimestepMode::Fixed {
        dt: PHYSICS_DT,
        substeps: 1,
    }
}

/// Apply our gravity to every physics context as it is created.
pub fn configure_gravity(mut configs: Query<&mut RapierConfiguration, Added<RapierConfiguration>>) {
    for mut config in configs.iter_mut() {
        config.gravity = GRAVITY;
        debug!("Physics gravity set to {}", GRAVITY);
    }
}

/// Visual transforms for the given dice, taken from their bodies.
///
/// Dice whose body cannot be found are skipped.
pub fn project_die_transforms(
    dice: &[DieRecord],
    body_transform: impl Fn(Entity) -> Option<Transform>,
) -> Vec<(Entity, Transform)> {
    dice.iter()
        .filter_map(|record| {
            body_transform(record.body).map(|body| {
                (
                    record.visual,
                    Transform::from_translation(body.translation).with_rotation(body.rotation),
                )
            })
        })
        .collect()
}

/// Copy body poses onto die visuals. Runs every frame, settled or not.
pub fn sync_die_visuals(
    roll_state: Res<RollState>,
    bodies: Query<&Transform, (With<DieBody>, Without<DieVisual>)>,
    mut visuals: Query<&mut Transform, (With<DieVisual>, Without<DieBody>)>,
) {
    let projected =
        project_die_transforms(roll_state.active_dice(), |body| bodies.get(body).ok().copied());

    for (visual, transform) in projected {
        if let Ok(mut visual_transform) = visuals.get_mut(visual) {
            *visual_transform = transform;
        }
    }
}
