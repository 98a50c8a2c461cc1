//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice tray,
//! organized into submodules by functionality:
//!
//! - `setup`: Scene initialization (camera, lights, arena, HUD)
//! - `clock`: Physics stepping configuration and body to visual sync
//! - `dice`: Roll commands, settle detection and result display
//! - `input`: Keyboard bindings
//! - `settings`: Settings persistence
//! - `theme_refresh`: Theme-tinted HUD colors

mod clock;
mod dice;
mod input;
mod settings;
mod setup;
mod theme_refresh;

// Re-export all public systems
pub use clock::{
    configure_gravity, fixed_timestep, project_die_transforms, sync_die_visuals, GRAVITY,
    PHYSICS_DT,
};
pub use dice::{
    apply_roll_commands, echo_roll_results, format_history, format_status, format_total,
    is_at_rest, resolve_settled_roll, update_results_display, RestTracker, REST_DURATION,
    REST_SPEED,
};
pub use input::handle_input;
pub use settings::{persist_settings_on_change, sync_settings};
pub use setup::{arena_colliders, log_window_resize, setup};
pub use theme_refresh::refresh_accent_colors_on_theme_change;
