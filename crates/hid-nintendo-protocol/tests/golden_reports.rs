//! Golden wire encodings for the Switch output reports.

use insta::assert_snapshot;
use padbridge_hid_nintendo_protocol as switch;

#[test]
fn test_rumble_weak_full() {
    let out = switch::build_rumble_report(0, 255, 0);
    assert_snapshot!(format!("{out:02X?}"), @"[10, 00, 00, 01, 40, 40, 00, C9, 40, 72]");
}

#[test]
fn test_rumble_strong_full_counter_wraps() {
    let out = switch::build_rumble_report(0x11, 0, 255);
    assert_snapshot!(format!("{out:02X?}"), @"[10, 01, 00, C9, 40, 72, 00, 01, 40, 40]");
}

#[test]
fn test_rumble_stop_is_neutral() {
    let out = switch::build_rumble_report(5, 0, 0);
    assert_snapshot!(format!("{out:02X?}"), @"[10, 05, 00, 01, 40, 40, 00, 01, 40, 40]");
}

#[test]
fn test_player_lights_seat_c() {
    let out = switch::build_player_lights_report(2, 0b0100);
    assert_snapshot!(
        format!("{:02X?}", out.get(..12).unwrap_or(&[])),
        @"[01, 02, 00, 01, 40, 40, 00, 01, 40, 40, 30, 04]"
    );
}

#[test]
fn test_set_input_mode_request() -> Result<(), Box<dyn std::error::Error>> {
    let out = switch::SetupStep::SetInputMode
        .build_request(7)
        .ok_or("no request")?;
    assert_snapshot!(
        format!("{:02X?}", out.get(..12).unwrap_or(&[])),
        @"[01, 07, 00, 01, 40, 40, 00, 01, 40, 40, 03, 30]"
    );
    Ok(())
}
