//! Golden wire encodings for the Wii Remote output reports.

use insta::assert_snapshot;
use padbridge_hid_wii_protocol as wii;

#[test]
fn test_rumble_on_off() {
    assert_snapshot!(format!("{:02X?}", wii::build_rumble_report(true).as_slice()), @"[10, 01]");
    assert_snapshot!(format!("{:02X?}", wii::build_rumble_report(false).as_slice()), @"[10, 00]");
}

#[test]
fn test_leds_seat_d_while_rumbling() {
    let out = wii::build_leds_report(0b1000, true);
    assert_snapshot!(format!("{:02X?}", out.as_slice()), @"[11, 81]");
}

#[test]
fn test_nunchuk_mode() {
    let out = wii::build_reporting_mode(wii::WiiExtension::Nunchuk.data_mode(), false);
    assert_snapshot!(format!("{:02X?}", out.as_slice()), @"[12, 00, 35]");
}
