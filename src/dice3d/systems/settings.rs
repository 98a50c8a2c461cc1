//! Settings persistence
//!
//! Theme and dice count changes made at runtime are written back to the
//! settings file so the next launch starts where this one left off.

use bevy::prelude::*;

use crate::dice3d::types::*;

/// Copy the live theme and dice count into `settings`. Returns true when
/// anything changed.
pub fn sync_settings(settings: &mut AppSettings, theme: &ThemeColor, dice_count: u32) -> bool {
    let mut changed = false;

    if settings.theme != theme.name() {
        settings.theme = theme.name().to_string();
        changed = true;
    }
    if settings.dice_count != dice_count {
        settings.dice_count = dice_count;
        changed = true;
    }

    changed
}

pub fn persist_settings_on_change(
    theme: Res<DiceTheme>,
    selection: Res<DiceCountSelection>,
    mut settings: ResMut<AppSettings>,
    path: Res<SettingsPath>,
) {
    let theme_changed = theme.is_changed() && !theme.is_added();
    let count_changed = selection.is_changed() && !selection.is_added();
    if !theme_changed && !count_changed {
        return;
    }

    if !sync_settings(&mut settings, &theme.0, selection.get()) {
        return;
    }

    match settings.save(&path.0) {
        Ok(()) => debug!("Saved settings to {}", path.0.display()),
        Err(e) => warn!("{}", e),
    }
}
