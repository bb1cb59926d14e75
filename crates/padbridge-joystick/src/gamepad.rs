//! Gamepad to joystick mappings.

use padbridge_model::gamepad::{
    BUTTON_A, BUTTON_B, BUTTON_SHOULDER_L, BUTTON_SHOULDER_R, BUTTON_THUMB_L, BUTTON_THUMB_R,
    BUTTON_TRIGGER_L, BUTTON_TRIGGER_R, BUTTON_X, DPAD_DOWN, DPAD_LEFT, DPAD_RIGHT, DPAD_UP,
    Gamepad,
};

use crate::{AXIS_THRESHOLD, Joystick, TwoButtonMode, button_level};

/// Tilt, in accelerometer units from rest, that counts as a steer.
pub const WII_ACCEL_THRESHOLD: i32 = 26;

fn pot(value: i32) -> u8 {
    u8::try_from((value >> 2).clamp(0, 255)).unwrap_or(u8::MAX)
}

fn directions(js: &mut Joystick, dpad: u8, x: i32, y: i32) {
    js.up |= dpad & DPAD_UP != 0 || y < -AXIS_THRESHOLD;
    js.down |= dpad & DPAD_DOWN != 0 || y > AXIS_THRESHOLD;
    js.left |= dpad & DPAD_LEFT != 0 || x < -AXIS_THRESHOLD;
    js.right |= dpad & DPAD_RIGHT != 0 || x > AXIS_THRESHOLD;
}

/// One joystick from one gamepad.
pub fn single_from_gamepad(gp: &Gamepad, mode: TwoButtonMode) -> Joystick {
    let mut js = Joystick {
        fire: gp.pressed(BUTTON_A | BUTTON_THUMB_L),
        auto_fire: gp.pressed(BUTTON_SHOULDER_R),
        button3: button_level(gp.pressed(BUTTON_X)),
        pot_x: pot(gp.brake),
        pot_y: pot(gp.throttle),
        ..Joystick::default()
    };
    directions(&mut js, gp.dpad, gp.axis_x, gp.axis_y);
    match mode {
        TwoButtonMode::Classic => js.up |= gp.pressed(BUTTON_B),
        TwoButtonMode::TwoButton => js.button2 = button_level(gp.pressed(BUTTON_B)),
    }
    js
}

/// Two joysticks from one gamepad: `(port1, port2)`.
///
/// Port 2 takes the d-pad and left stick, port 1 the right stick.
pub fn twin_from_gamepad(gp: &Gamepad) -> (Joystick, Joystick) {
    let mut j2 = Joystick {
        fire: gp.pressed(BUTTON_A | BUTTON_THUMB_L | BUTTON_TRIGGER_L),
        auto_fire: gp.pressed(BUTTON_SHOULDER_L),
        ..Joystick::default()
    };
    directions(&mut j2, gp.dpad, gp.axis_x, gp.axis_y);

    let mut j1 = Joystick {
        fire: gp.pressed(BUTTON_B | BUTTON_THUMB_R | BUTTON_TRIGGER_R),
        auto_fire: gp.pressed(BUTTON_SHOULDER_R),
        ..Joystick::default()
    };
    directions(&mut j1, 0, gp.axis_rx, gp.axis_ry);
    (j1, j2)
}

/// Wii Remote held as a steering wheel.
///
/// Tilting left/right (accelerometer Y) steers. Up/down follow the d-pad
/// unless the remote is pitched (accelerometer X) past the threshold, in
/// which case the pitch wins.
pub fn single_from_wii_accel(gp: &Gamepad) -> Joystick {
    let [ax, ay, _] = gp.accel;
    let mut js = Joystick {
        fire: gp.pressed(BUTTON_A | BUTTON_B),
        left: ay < -WII_ACCEL_THRESHOLD,
        right: ay > WII_ACCEL_THRESHOLD,
        up: gp.dpad_pressed(DPAD_UP),
        down: gp.dpad_pressed(DPAD_DOWN),
        ..Joystick::default()
    };
    if ax.unsigned_abs() > WII_ACCEL_THRESHOLD.unsigned_abs() {
        js.up = ax < 0;
        js.down = ax > 0;
    }
    js
}
