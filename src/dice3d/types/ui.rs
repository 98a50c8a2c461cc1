//! UI-related types and components
//!
//! This module contains the HUD text markers and the dice count stepper.

use bevy::prelude::*;

use super::session::{clamp_dice_count, MIN_DICE};

/// Marker for the status/help text in the top-left corner
#[derive(Component)]
pub struct ResultsText;

/// Marker for the large total readout
#[derive(Component)]
pub struct TotalText;

/// Marker for the roll history list
#[derive(Component)]
pub struct HistoryText;

/// Text tinted with the current theme color
#[derive(Component)]
pub struct AccentText;

/// Dice count picked by the stepper, always within the allowed range.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceCountSelection(u32);

impl Default for DiceCountSelection {
    fn default() -> Self {
        Self(MIN_DICE)
    }
}

impl DiceCountSelection {
    pub fn new(count: u32) -> Self {
        Self(clamp_dice_count(count))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn set(&mut self, count: u32) {
        self.0 = clamp_dice_count(count);
    }

    pub fn increment(&mut self) {
        self.set(self.0 + 1);
    }

    pub fn decrement(&mut self) {
        self.set(self.0.saturating_sub(1));
    }
}

/// Print each resolved roll to stdout.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct EchoRolls;
