//! Tests for the Wii Remote / Balance Board driver.

use super::wii::{WiiDriver, WiiExtension};
use super::{Capabilities, ControllerDriver, OutputSink, SetupStatus};
use padbridge_errors::{DecodeError, TransportError};
use padbridge_hid_common::DeviceIdentity;
use padbridge_hid_common::mock::MockTransport;
use padbridge_model::gamepad::{BUTTON_A, BUTTON_SHOULDER_L, DPAD_UP};
use padbridge_model::{Controller, ControllerClass, RumbleRequest};

const STATUS_WITH_EXTENSION: [u8; 7] = [0x20, 0x00, 0x00, 0x02, 0x00, 0x00, 0xC8];
const STATUS_BARE: [u8; 7] = [0x20, 0x00, 0x00, 0x10, 0x00, 0x00, 0xC8];
const WRITE_ACK: [u8; 5] = [0x22, 0x00, 0x00, 0x16, 0x00];

fn extension_id_reply(id: [u8; 6]) -> Vec<u8> {
    let mut r = vec![0x21, 0x00, 0x00, 0x50, 0x00, 0xFA];
    r.extend_from_slice(&id);
    r
}

fn remote() -> WiiDriver {
    WiiDriver::new(&DeviceIdentity::new(0x057E, 0x0306).with_name("Nintendo RVL-CNT-01"))
}

fn board() -> WiiDriver {
    WiiDriver::new(&DeviceIdentity::new(0x057E, 0x0306).with_name("Nintendo RVL-WBC-01"))
}

fn feed(
    drv: &mut WiiDriver,
    sink: &mut OutputSink<'_>,
    ctl: &mut Controller,
    report: &[u8],
) -> Result<(), DecodeError> {
    drv.init_report(ctl);
    drv.parse_input_report(ctl, report, sink)
}

#[test]
fn test_bare_remote_setup() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 1);
    let mut drv = remote();
    let mut ctl = Controller::default();

    assert_eq!(drv.setup(&mut sink)?, SetupStatus::Negotiating);
    feed(&mut drv, &mut sink, &mut ctl, &STATUS_BARE)?;

    assert!(drv.is_ready());
    assert_eq!(drv.extension(), WiiExtension::None);
    assert_eq!(
        transport.sent_to(1),
        vec![vec![0x15, 0x00], vec![0x12, 0x00, 0x31]]
    );
    assert_eq!(ctl.battery, 255);
    Ok(())
}

#[test]
fn test_balance_board_detection_and_decode() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 2);
    let mut drv = board();
    let mut ctl = Controller::default();
    assert_eq!(drv.class(), ControllerClass::BalanceBoard);

    drv.setup(&mut sink)?;
    feed(&mut drv, &mut sink, &mut ctl, &STATUS_WITH_EXTENSION)?;
    feed(&mut drv, &mut sink, &mut ctl, &WRITE_ACK)?;
    feed(&mut drv, &mut sink, &mut ctl, &WRITE_ACK)?;
    assert!(!drv.is_ready());
    feed(
        &mut drv,
        &mut sink,
        &mut ctl,
        &extension_id_reply([0x00, 0x00, 0xA4, 0x20, 0x04, 0x02]),
    )?;
    assert!(drv.is_ready());
    assert_eq!(drv.extension(), WiiExtension::BalanceBoard);
    assert_eq!(
        transport.last_sent().map(|r| r.bytes),
        Some(vec![0x12, 0x00, 0x34])
    );

    let mut data = vec![0x34, 0x00, 0x00];
    // TR, BR, TL, BL
    for v in [1000u16, 2000, 3000, 4000] {
        data.extend_from_slice(&v.to_be_bytes());
    }
    data.extend_from_slice(&[0x19, 0x00, 0x64]);
    data.resize(22, 0);
    feed(&mut drv, &mut sink, &mut ctl, &data)?;

    let bb = ctl.balance_board().ok_or("balance board arm")?;
    assert_eq!((bb.tr, bb.br, bb.tl, bb.bl), (1000, 2000, 3000, 4000));
    assert_eq!(bb.temperature, 0x19);
    assert!(ctl.battery > 0);
    assert!(!drv.capabilities().contains(Capabilities::RUMBLE));
    assert!(drv.rumble().is_none());
    Ok(())
}

#[test]
fn test_nunchuk_decode() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 3);
    let mut drv = remote();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;
    feed(&mut drv, &mut sink, &mut ctl, &STATUS_WITH_EXTENSION)?;
    feed(&mut drv, &mut sink, &mut ctl, &WRITE_ACK)?;
    feed(&mut drv, &mut sink, &mut ctl, &WRITE_ACK)?;
    feed(
        &mut drv,
        &mut sink,
        &mut ctl,
        &extension_id_reply([0x00, 0x00, 0xA4, 0x20, 0x00, 0x00]),
    )?;
    assert_eq!(drv.extension(), WiiExtension::Nunchuk);

    // 0x35: buttons (UP + A), accel, then nunchuk stick pushed right with C held
    let mut data = vec![0x35, 0x08, 0x08, 0x80, 0x80, 0x80];
    data.extend_from_slice(&[0xFF, 0x80, 0x80, 0x80, 0x80, 0b0000_0001]);
    data.resize(22, 0);
    feed(&mut drv, &mut sink, &mut ctl, &data)?;

    let gp = ctl.gamepad().ok_or("gamepad arm")?;
    assert!(gp.pressed(BUTTON_A));
    assert!(gp.dpad_pressed(DPAD_UP));
    assert!(gp.pressed(BUTTON_SHOULDER_L));
    assert!(gp.axis_x > 400);
    Ok(())
}

#[test]
fn test_status_report_keeps_last_snapshot() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 4);
    let mut drv = remote();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;
    feed(&mut drv, &mut sink, &mut ctl, &STATUS_BARE)?;

    // horizontal remote: button 2 is A
    feed(&mut drv, &mut sink, &mut ctl, &[0x31, 0x00, 0x01, 0x80, 0x80, 0x80])?;
    assert!(ctl.gamepad().is_some_and(|gp| gp.pressed(BUTTON_A)));

    feed(&mut drv, &mut sink, &mut ctl, &STATUS_BARE)?;
    assert!(ctl.gamepad().is_some_and(|gp| gp.pressed(BUTTON_A)));
    // detection re-ran and re-selected the reporting mode
    assert_eq!(
        transport.last_sent().map(|r| r.bytes),
        Some(vec![0x12, 0x00, 0x31])
    );
    Ok(())
}

#[test]
fn test_short_data_report_is_error() {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 4);
    let mut drv = remote();
    let mut ctl = Controller::default();
    let result = feed(&mut drv, &mut sink, &mut ctl, &[0x35, 0x00]);
    assert!(matches!(result, Err(DecodeError::Truncated { .. })));
    assert_eq!(ctl.class(), ControllerClass::Gamepad);
}

#[test]
fn test_rumble_on_off_and_leds() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 5);
    let mut drv = remote();
    drv.rumble()
        .ok_or("rumble")?
        .play_dual_rumble(&mut sink, RumbleRequest::new(0, 500, 255, 0))?;
    drv.player_leds()
        .ok_or("leds")?
        .set_player_leds(&mut sink, 0b0001)?;

    let sent = transport.sent();
    let bytes: Vec<Vec<u8>> = sent.iter().map(|r| r.bytes.clone()).collect();
    assert_eq!(bytes, vec![vec![0x10, 0x01], vec![0x10, 0x00], vec![0x11, 0x10]]);
    assert_eq!(sent.get(1).and_then(|r| r.delay_ms), Some(500));
    Ok(())
}

#[test]
fn test_suffixed_board_name_is_balance_board() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 5);
    let mut drv = WiiDriver::new(
        &DeviceIdentity::new(0x057E, 0x0306).with_name("Nintendo RVL-WBC-01 (2)"),
    );
    let mut ctl = Controller::default();
    assert_eq!(drv.class(), ControllerClass::BalanceBoard);

    // data arriving before extension detection still fills the board arm
    let mut data = vec![0x34, 0x00, 0x00];
    for v in [10u16, 20, 30, 40] {
        data.extend_from_slice(&v.to_be_bytes());
    }
    data.resize(22, 0);
    feed(&mut drv, &mut sink, &mut ctl, &data)?;
    assert_eq!(ctl.class(), ControllerClass::BalanceBoard);
    assert_eq!(ctl.balance_board().map(|bb| bb.tr), Some(10));

    let result = feed(&mut drv, &mut sink, &mut ctl, &[0x30, 0x00, 0x00]);
    assert!(result.is_err());
    assert_eq!(ctl.class(), ControllerClass::BalanceBoard);
    Ok(())
}

#[test]
fn test_failed_setup_send_is_kept_for_the_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 6);
    let mut drv = remote();
    let mut ctl = Controller::default();
    drv.setup(&mut sink)?;
    assert_eq!(drv.take_transport_error(), None);

    transport.fail_with(TransportError::Disconnected);
    feed(&mut drv, &mut sink, &mut ctl, &STATUS_WITH_EXTENSION)?;
    assert_eq!(
        drv.take_transport_error(),
        Some(TransportError::Disconnected)
    );
    assert_eq!(drv.take_transport_error(), None);

    // a fresh setup starts clean
    transport.recover();
    drv.setup(&mut sink)?;
    assert_eq!(drv.take_transport_error(), None);
    Ok(())
}
