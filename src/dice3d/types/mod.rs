//! Type definitions for the Dice Tray 3D simulator
//!
//! This module is organized into submodules:
//! - `dice` - Face mapping table, outcome resolver and die components
//! - `session` - Roll state machine, roll history and control messages
//! - `settings` - Theme color, settle mode and settings persistence
//! - `ui` - HUD components and the dice count stepper
//! - `camera` - Camera-related components

pub mod camera;
pub mod dice;
pub mod session;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use dice::*;
pub use session::*;
pub use settings::*;
pub use ui::*;
