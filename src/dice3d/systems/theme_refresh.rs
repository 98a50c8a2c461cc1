use bevy::prelude::*;

use crate::dice3d::types::{AccentText, DiceTheme};

pub fn refresh_accent_colors_on_theme_change(
    theme: Res<DiceTheme>,
    mut accents: Query<&mut TextColor, With<AccentText>>,
) {
    if !theme.is_changed() {
        return;
    }

    let color = theme.0.to_color();
    for mut text_color in accents.iter_mut() {
        *text_color = TextColor(color);
    }
}
