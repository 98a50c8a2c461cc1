//! Randomized drop placement
//!
//! Every roll's entropy comes from here: where a die starts, how it is
//! oriented and the impulse that sends it tumbling.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The arena is centered at origin with walls at these positions.
pub const ARENA_HALF_EXTENT: f32 = 4.5;
pub const ARENA_FLOOR_Y: f32 = 0.0;
pub const ARENA_CEILING_Y: f32 = 10.0;

/// Horizontal half-width of the drop volume.
pub const DROP_HALF_WIDTH: f32 = 2.0;
/// Height of the first die's drop point.
pub const DROP_BASE_HEIGHT: f32 = 3.0;
/// Extra height per die index so stacked dice don't spawn inside each other.
pub const DROP_HEIGHT_STEP: f32 = 1.2;
/// Random vertical jitter added to each drop point.
pub const DROP_HEIGHT_JITTER: f32 = 0.5;

/// Impulse magnitude range: enough to tumble, not enough to clear the walls.
pub const IMPULSE_MIN: f32 = 10.0;
pub const IMPULSE_MAX: f32 = 15.0;
/// Horizontal impulse components are drawn from `±IMPULSE_SPREAD * magnitude`.
pub const IMPULSE_SPREAD: f32 = 0.5;
/// The impulse is applied this far (per axis) from the center of mass.
pub const IMPULSE_OFFSET: f32 = 0.1;

/// Initial pose and kick for one die.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiePlacement {
    pub position: Vec3,
    pub rotation: Quat,
    pub impulse: Vec3,
    pub torque_impulse: Vec3,
}

impl DiePlacement {
    /// Draw a placement for the die at `index` within a roll.
    pub fn random<R: Rng>(rng: &mut R, index: u32) -> Self {
        let position = Vec3::new(
            rng.gen_range(-DROP_HALF_WIDTH..DROP_HALF_WIDTH),
            DROP_BASE_HEIGHT
                + index as f32 * DROP_HEIGHT_STEP
                + rng.gen_range(0.0..DROP_HEIGHT_JITTER),
            rng.gen_range(-DROP_HALF_WIDTH..DROP_HALF_WIDTH),
        );

        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
            rng.gen_range(0.0..std::f32::consts::TAU),
        );

        let magnitude = rng.gen_range(IMPULSE_MIN..IMPULSE_MAX);
        let impulse = Vec3::new(
            rng.gen_range(-IMPULSE_SPREAD..IMPULSE_SPREAD) * magnitude,
            magnitude,
            rng.gen_range(-IMPULSE_SPREAD..IMPULSE_SPREAD) * magnitude,
        );

        let offset = Vec3::new(
            rng.gen_range(-IMPULSE_OFFSET..IMPULSE_OFFSET),
            rng.gen_range(-IMPULSE_OFFSET..IMPULSE_OFFSET),
            rng.gen_range(-IMPULSE_OFFSET..IMPULSE_OFFSET),
        );

        Self {
            position,
            rotation,
            impulse,
            torque_impulse: offset.cross(impulse),
        }
    }
}

/// Random source for die placement.
///
/// Seeded from OS entropy unless a seed is configured.
#[derive(Resource)]
pub struct DiceRng(pub StdRng);

impl Default for DiceRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl DiceRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self::default(),
        }
    }
}
