//! Keyboard capture for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};
use wayfarer_app::app_loop::FrameKeys;

const UP_KEYS: [KeyCode; 2] = [KeyCode::W, KeyCode::Up];
const DOWN_KEYS: [KeyCode; 2] = [KeyCode::S, KeyCode::Down];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::A, KeyCode::Left];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::D, KeyCode::Right];

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|key| is_key_down(*key))
}

pub fn capture_frame_keys() -> FrameKeys {
    FrameKeys {
        up: any_down(&UP_KEYS),
        down: any_down(&DOWN_KEYS),
        left: any_down(&LEFT_KEYS),
        right: any_down(&RIGHT_KEYS),
        charge_held: is_key_down(KeyCode::X),
        interact_pressed: is_key_pressed(KeyCode::E),
        health_potion_pressed: is_key_pressed(KeyCode::Key1),
        mana_potion_pressed: is_key_pressed(KeyCode::Key2),
    }
}
