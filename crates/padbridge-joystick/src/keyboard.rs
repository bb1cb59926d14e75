//! Keyboard to joystick mappings.
//!
//! Single mode: arrows steer, Space or Z fires, X and C are button2 and
//! button3. Left Ctrl/Shift/Alt double as fire/button2/button3.
//!
//! Twin mode: arrows with Space and right Ctrl/Shift/Alt drive port 1;
//! WASD with Q/E/R drive port 2.

use padbridge_hid_common::usage::key;
use padbridge_model::keyboard::{
    Keyboard, MOD_LEFT_ALT, MOD_LEFT_CONTROL, MOD_LEFT_SHIFT, MOD_RIGHT_ALT, MOD_RIGHT_CONTROL,
    MOD_RIGHT_SHIFT,
};

use crate::{Joystick, KeyboardMode, button_level};

fn arrows(kb: &Keyboard) -> Joystick {
    Joystick {
        up: kb.key_pressed(key::UP_ARROW),
        down: kb.key_pressed(key::DOWN_ARROW),
        left: kb.key_pressed(key::LEFT_ARROW),
        right: kb.key_pressed(key::RIGHT_ARROW),
        ..Joystick::default()
    }
}

/// Map a keyboard snapshot to `(port1, port2)`. Port 2 is idle in single
/// mode.
pub fn from_keyboard(kb: &Keyboard, mode: KeyboardMode) -> (Joystick, Joystick) {
    let mut j1 = arrows(kb);
    let mut j2 = Joystick::default();
    match mode {
        KeyboardMode::Single => {
            j1.fire = kb.key_pressed(key::SPACE)
                || kb.key_pressed(key::Z)
                || kb.modifier_pressed(MOD_LEFT_CONTROL);
            j1.button2 = button_level(kb.key_pressed(key::X) || kb.modifier_pressed(MOD_LEFT_SHIFT));
            j1.button3 = button_level(kb.key_pressed(key::C) || kb.modifier_pressed(MOD_LEFT_ALT));
        }
        KeyboardMode::Twin => {
            j1.fire = kb.key_pressed(key::SPACE) || kb.modifier_pressed(MOD_RIGHT_CONTROL);
            j1.button2 = button_level(kb.modifier_pressed(MOD_RIGHT_SHIFT));
            j1.button3 = button_level(kb.modifier_pressed(MOD_RIGHT_ALT));

            j2.up = kb.key_pressed(key::W);
            j2.down = kb.key_pressed(key::S);
            j2.left = kb.key_pressed(key::A);
            j2.right = kb.key_pressed(key::D);
            j2.fire = kb.key_pressed(key::Q);
            j2.button2 = button_level(kb.key_pressed(key::E));
            j2.button3 = button_level(kb.key_pressed(key::R));
        }
    }
    (j1, j2)
}
