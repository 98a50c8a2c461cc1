//! Input handling systems
//!
//! Keyboard bindings translate into [`RollCommand`]s and dice count changes.

use bevy::prelude::*;

use crate::dice3d::types::*;

const COUNT_KEYS: [(KeyCode, u32); 5] = [
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
    (KeyCode::Digit5, 5),
];

/// Handle keyboard input for rolling, resetting, dice count and theme
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    roll_state: Res<RollState>,
    mut selection: ResMut<DiceCountSelection>,
    theme: Res<DiceTheme>,
    mut requests: MessageWriter<RollCommand>,
) {
    for (key, count) in COUNT_KEYS {
        if keyboard.just_pressed(key) {
            selection.set(count);
        }
    }

    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        selection.increment();
    }
    if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        selection.decrement();
    }

    if keyboard.just_pressed(KeyCode::KeyT) {
        requests.write(RollCommand::SetTheme(theme.0.next_preset()));
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        requests.write(RollCommand::Reset);
    }

    // Rolling is disabled until the current dice settle.
    if keyboard.just_pressed(KeyCode::Space) && !roll_state.is_rolling() {
        requests.write(RollCommand::Roll {
            dice_count: selection.get(),
        });
    }
}
