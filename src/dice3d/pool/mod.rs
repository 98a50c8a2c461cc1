//! Physics body pool
//!
//! Creates and removes the per-die rigid bodies and their paired visuals.
//! The roll state only talks to dice through [`DicePool`], so it can be
//! exercised without a running physics world.

mod bodies;
mod placement;

pub use bodies::{
    create_die_body, place_randomized, remove_die_body, spawn_die_visual, DiceWorld, LiveBodies,
    DIE_FRICTION, DIE_MASS, DIE_RESTITUTION,
};
pub use placement::*;

use crate::dice3d::types::{DieId, DieRecord};

/// Allocates and releases the dice of a roll.
pub trait DicePool {
    /// Create a body and visual for one die, placed and kicked per `placement`.
    fn create_die(&mut self, id: DieId, placement: &DiePlacement) -> DieRecord;

    /// Remove a die's body from the simulation and detach its visual.
    ///
    /// Removing a die that is already gone is a no-op.
    fn remove_die(&mut self, record: &DieRecord);
}
