//! Tests for the Switch driver.

use super::switch::{SetupStep, StickCalibration, SwitchDriver, SwitchModel};
use super::{ControllerDriver, OutputSink, SetupStatus};
use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_hid_common::mock::MockTransport;
use padbridge_model::gamepad::BUTTON_A;
use padbridge_model::{Controller, RumbleRequest};

const CENTER: [u8; 3] = [0x00, 0x08, 0x80];

fn reply(ack: u8, subcommand: u8, data: &[u8]) -> Vec<u8> {
    let mut r = vec![0x21, 0x00, 0x8E, 0x00, 0x00, 0x00];
    r.extend_from_slice(&CENTER);
    r.extend_from_slice(&CENTER);
    r.push(0x00);
    r.push(ack);
    r.push(subcommand);
    r.extend_from_slice(data);
    r
}

fn spi_reply(payload: &[u8; 18]) -> Vec<u8> {
    let mut data = 0x603Du32.to_le_bytes().to_vec();
    data.push(18);
    data.extend_from_slice(payload);
    reply(0x90, 0x10, &data)
}

fn pro() -> SwitchDriver {
    SwitchDriver::new(&DeviceIdentity::new(0x057E, 0x2009).with_name("Pro Controller"))
}

/// Subcommand id of every report sent so far.
fn subcommands(transport: &MockTransport) -> Vec<u8> {
    transport
        .sent()
        .iter()
        .filter(|r| r.bytes.first() == Some(&0x01))
        .filter_map(|r| r.bytes.get(10).copied())
        .collect()
}

#[test]
fn test_full_setup_sequence() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    let mut ctl = Controller::default();

    assert_eq!(drv.setup(&mut sink)?, SetupStatus::Negotiating);
    assert_eq!(subcommands(&transport), vec![0x02]);

    drv.parse_input_report(&mut ctl, &reply(0x82, 0x02, &[0x03, 0x48]), &mut sink)?;
    assert_eq!(drv.step(), SetupStep::ReadStickCalibration);
    assert_eq!(subcommands(&transport), vec![0x02, 0x10]);

    drv.parse_input_report(&mut ctl, &spi_reply(&[0xFF; 18]), &mut sink)?;
    drv.parse_input_report(&mut ctl, &reply(0x80, 0x40, &[]), &mut sink)?;
    drv.parse_input_report(&mut ctl, &reply(0x80, 0x48, &[]), &mut sink)?;
    assert!(!drv.is_ready());
    drv.parse_input_report(&mut ctl, &reply(0x80, 0x03, &[]), &mut sink)?;

    assert!(drv.is_ready());
    assert_eq!(subcommands(&transport), vec![0x02, 0x10, 0x40, 0x48, 0x03]);
    let counters: Vec<u8> = transport
        .sent()
        .iter()
        .filter_map(|r| r.bytes.get(1).copied())
        .collect();
    assert_eq!(counters, vec![0, 1, 2, 3, 4]);
    Ok(())
}

#[test]
fn test_out_of_order_reply_does_not_advance() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;

    drv.parse_input_report(&mut ctl, &reply(0x80, 0x48, &[]), &mut sink)?;
    assert_eq!(drv.step(), SetupStep::DeviceInfo);
    assert_eq!(transport.sent().len(), 1);
    Ok(())
}

#[test]
fn test_factory_calibration_applied() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;
    drv.parse_input_report(&mut ctl, &reply(0x82, 0x02, &[]), &mut sink)?;

    // left: above (0x600, 0x600), center (0x800, 0x800), below (0x600, 0x600)
    let block = [
        0x00, 0x06, 0x60, 0x00, 0x08, 0x80, 0x00, 0x06, 0x60, // left
        0x00, 0x08, 0x80, 0x00, 0x06, 0x60, 0x00, 0x06, 0x60, // right
    ];
    drv.parse_input_report(&mut ctl, &spi_reply(&block), &mut sink)?;

    let (left, right) = drv.calibration();
    assert_eq!(left.x_center, 0x800);
    assert_eq!(left.x_above, 0x600);
    assert_eq!(right.y_center, 0x800);
    assert_ne!(left, StickCalibration::default());
    assert_eq!(drv.step(), SetupStep::EnableImu);
    Ok(())
}

#[test]
fn test_simple_report_dropped_during_setup() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;
    drv.init_report(&mut ctl);

    let result = drv.parse_input_report(&mut ctl, &[0x3F, 0x00, 0x00, 0x08], &mut sink);
    assert!(matches!(result, Err(DecodeError::UnknownReport { report_id: 0x3F, .. })));
    assert!(!drv.is_ready());
    Ok(())
}

#[test]
fn test_full_report_decodes_buttons() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    let mut ctl = Controller::default();
    drv.init_report(&mut ctl);

    let mut report = vec![0x30, 0x00, 0x8E, 0x08, 0x00, 0x00];
    report.extend_from_slice(&CENTER);
    report.extend_from_slice(&CENTER);
    report.push(0x00);
    drv.parse_input_report(&mut ctl, &report, &mut sink)?;

    let gp = ctl.gamepad().ok_or("gamepad arm")?;
    assert!(gp.pressed(BUTTON_A));
    assert!(ctl.battery > 0);
    Ok(())
}

#[test]
fn test_rumble_counters_and_stop() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    drv.rumble()
        .ok_or("rumble capability")?
        .play_dual_rumble(&mut sink, RumbleRequest::new(0, 500, 255, 0))?;

    let sent = transport.sent();
    let on = sent.first().ok_or("on report")?;
    assert_eq!(
        on.bytes,
        vec![0x10, 0x00, 0x00, 0x01, 0x40, 0x40, 0x00, 0xC9, 0x40, 0x72]
    );
    let off = sent.get(1).ok_or("off report")?;
    assert_eq!(off.delay_ms, Some(500));
    assert_eq!(
        off.bytes,
        vec![0x10, 0x01, 0x00, 0x01, 0x40, 0x40, 0x00, 0x01, 0x40, 0x40]
    );
    Ok(())
}

#[test]
fn test_joycon_model_from_name() {
    let drv = SwitchDriver::new(&DeviceIdentity::new(0, 0).with_name("Joy-Con (L)"));
    assert_eq!(drv.model(), SwitchModel::JoyConLeft);
    let drv = SwitchDriver::new(&DeviceIdentity::new(0x057E, 0x2007));
    assert_eq!(drv.model(), SwitchModel::JoyConRight);
}

#[test]
fn test_player_leds_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    drv.player_leds()
        .ok_or("player leds")?
        .set_player_leds(&mut sink, 0b0010)?;
    let last = transport.last_sent().ok_or("report")?;
    assert_eq!(last.bytes.get(10..12), Some(&[0x30, 0x02][..]));
    Ok(())
}

#[test]
fn test_failed_setup_request_is_kept_for_the_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 9);
    let mut drv = pro();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;

    transport.fail_with(TransportError::Disconnected);
    drv.parse_input_report(&mut ctl, &reply(0x82, 0x02, &[0x03, 0x48]), &mut sink)?;
    assert_eq!(drv.step(), SetupStep::ReadStickCalibration);
    assert_eq!(
        drv.take_transport_error(),
        Some(TransportError::Disconnected)
    );
    assert_eq!(drv.take_transport_error(), None);
    assert_eq!(subcommands(&transport), vec![0x02]);
    Ok(())
}
