//! Tests for the DualShock 4 driver.

use super::ds4::Ds4Driver;
use super::{Capabilities, ControllerDriver, DriverFamily, OutputSink, SetupStatus};
use padbridge_errors::DecodeError;
use padbridge_hid_common::DeviceIdentity;
use padbridge_hid_common::mock::MockTransport;
use padbridge_model::gamepad::{BUTTON_A, DPAD_RIGHT, MISC_SYSTEM};
use padbridge_model::{Controller, ControllerClass, Rgb, RumbleRequest};

fn driver() -> Ds4Driver {
    Ds4Driver::new(&DeviceIdentity::new(0x054C, 0x09CC).with_name("Wireless Controller"))
}

fn full_report(buttons: [u8; 3], status: u8) -> Vec<u8> {
    let mut r = vec![0u8; 78];
    r[0] = 0x11;
    r[1] = 0xC0;
    r[3..7].copy_from_slice(&[0x80, 0x80, 0x80, 0x80]);
    r[7..10].copy_from_slice(&buttons);
    r[32] = status;
    r
}

#[test]
fn test_setup_requests_calibration() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 7);
    let mut drv = driver();

    assert_eq!(drv.setup(&mut sink)?, SetupStatus::Negotiating);
    assert!(!drv.is_ready());
    assert_eq!(transport.feature_requests(), vec![(7, 0x05)]);
    Ok(())
}

#[test]
fn test_feature_reply_completes_negotiation() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 7);
    let mut drv = driver();
    drv.setup(&mut sink)?;

    let mut ctl = Controller::default();
    drv.parse_feature_report(&mut ctl, &[0x05, 0x01, 0x02], &mut sink)?;
    assert!(drv.is_ready());
    Ok(())
}

#[test]
fn test_full_report_completes_negotiation_and_decodes() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 1);
    let mut drv = driver();
    drv.setup(&mut sink)?;

    let mut ctl = Controller::default();
    drv.init_report(&mut ctl);
    // cross with hat east, PS button, half battery
    drv.parse_input_report(&mut ctl, &full_report([0x22, 0x00, 0x01], 0x05), &mut sink)?;

    assert!(drv.is_ready());
    let gp = ctl.gamepad().ok_or("gamepad arm")?;
    assert!(gp.pressed(BUTTON_A));
    assert!(gp.dpad_pressed(DPAD_RIGHT));
    assert!(gp.misc_pressed(MISC_SYSTEM));
    assert_eq!(gp.axis_x, 0);
    assert!(ctl.battery > 0);
    Ok(())
}

#[test]
fn test_truncated_report_keeps_class() {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 1);
    let mut drv = driver();
    let mut ctl = Controller::default();
    drv.init_report(&mut ctl);

    let result = drv.parse_input_report(&mut ctl, &[0x11, 0xC0, 0x00], &mut sink);
    assert!(matches!(result, Err(DecodeError::Truncated { .. })));
    assert_eq!(ctl.class(), ControllerClass::Gamepad);
}

#[test]
fn test_unexpected_feature_report() {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 1);
    let mut drv = driver();
    let mut ctl = Controller::default();
    let result = drv.parse_feature_report(&mut ctl, &[0x12], &mut sink);
    assert!(matches!(result, Err(DecodeError::UnknownReport { report_id: 0x12, .. })));
    assert!(!drv.is_ready());
}

#[test]
fn test_rumble_on_then_scheduled_stop() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 2);
    let mut drv = driver();
    assert_eq!(drv.family(), DriverFamily::Ds4);
    assert!(drv.capabilities().contains(Capabilities::RUMBLE | Capabilities::LIGHTBAR));

    let rumble = drv.rumble().ok_or("rumble capability")?;
    rumble.play_dual_rumble(&mut sink, RumbleRequest::new(0, 500, 255, 0))?;

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    let on = sent.first().ok_or("on report")?;
    assert_eq!(on.delay_ms, None);
    assert_eq!(on.bytes.get(..8), Some(&[0x11, 0xC0, 0x00, 0x01, 0x00, 0x00, 0xFF, 0x00][..]));
    let off = sent.get(1).ok_or("off report")?;
    assert_eq!(off.delay_ms, Some(500));
    assert_eq!(off.bytes.get(6..8), Some(&[0x00, 0x00][..]));
    Ok(())
}

#[test]
fn test_lightbar_report() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 2);
    let mut drv = driver();
    drv.lightbar()
        .ok_or("lightbar capability")?
        .set_lightbar_color(&mut sink, Rgb::new(1, 2, 3))?;
    let last = transport.last_sent().ok_or("report")?;
    assert_eq!(last.bytes.get(8..11), Some(&[1, 2, 3][..]));
    assert!(drv.player_leds().is_none());
    assert!(drv.adaptive_triggers().is_none());
    Ok(())
}
