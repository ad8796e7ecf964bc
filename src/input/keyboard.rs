//! Keyboard polling (macroquad)

use macroquad::input::{is_key_down, KeyCode};
use super::{Action, InputSnapshot};

fn keyboard_down(action: Action) -> bool {
    match action {
        Action::MoveLeft => is_key_down(KeyCode::A) || is_key_down(KeyCode::Left),
        Action::MoveRight => is_key_down(KeyCode::D) || is_key_down(KeyCode::Right),
        Action::Jump => is_key_down(KeyCode::K) || is_key_down(KeyCode::Space),
        Action::Fire => is_key_down(KeyCode::J),
        Action::ToggleDebug => is_key_down(KeyCode::F12),
    }
}

/// Sample which actions are held this frame. Call once per frame.
pub fn sample_keyboard() -> InputSnapshot {
    let mut snapshot = InputSnapshot::empty();
    for action in Action::ALL {
        snapshot.set(action, keyboard_down(action));
    }
    snapshot
}
