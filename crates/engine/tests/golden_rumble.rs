//! Rumble as it leaves the manager: report bytes plus scheduling.
//!
//! Every device plays `RumbleRequest::new(0, 500, 255, 0)`, a half second
//! of the weak motor at full strength.

use std::sync::Arc;

use insta::assert_snapshot;
use padbridge_engine::{DeviceManager, EngineConfig, NullApplication};
use padbridge_hid_common::mock::{MockTransport, SentReport};
use padbridge_hid_common::{BdAddr, DeviceIdentity};
use padbridge_hid_sony_protocol::{SONY_VENDOR_ID, product_ids as sony_pids, report_ids};
use padbridge_hid_xbox_protocol::{MICROSOFT_VENDOR_ID, product_ids as xbox_pids};
use padbridge_model::RumbleRequest;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const HANDLE: u32 = 1;

fn ready_device(identity: DeviceIdentity) -> Result<(MockTransport, DeviceManager), Box<dyn std::error::Error>> {
    let transport = MockTransport::new();
    let manager = DeviceManager::new(
        EngineConfig::default(),
        Arc::new(transport.clone()),
        Arc::new(NullApplication),
    );
    manager.on_device_connected(HANDLE, identity.with_address(BdAddr::new([0, 1, 2, 3, 4, 5])))?;
    manager.on_device_ready(HANDLE)?;
    if !transport.feature_requests().is_empty() {
        manager.deliver_feature_report(HANDLE, &[report_ids::CALIBRATION_FEATURE, 0, 0, 0])?;
    }
    transport.clear();
    Ok((transport, manager))
}

fn play(identity: DeviceIdentity) -> Result<Vec<SentReport>, Box<dyn std::error::Error>> {
    let (transport, manager) = ready_device(identity)?;
    manager.play_dual_rumble(HANDLE, RumbleRequest::new(0, 500, 255, 0))?;
    Ok(transport.sent())
}

fn head(report: Option<&SentReport>) -> String {
    let bytes = report.map_or(&[][..], |r| r.bytes.get(..16).unwrap_or(r.bytes.as_slice()));
    format!("{bytes:02X?}")
}

#[test]
fn test_xbox_rumble_carries_its_own_timing() -> TestResult {
    let sent = play(DeviceIdentity::new(MICROSOFT_VENDOR_ID, xbox_pids::XBOX_ONE_S_V2))?;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent.first().and_then(|r| r.delay_ms), None);
    assert_snapshot!(head(sent.first()), @"[03, 03, 00, 00, 00, 64, 32, 00, 00]");
    Ok(())
}

#[test]
fn test_ds4_rumble_schedules_stop() -> TestResult {
    let sent = play(DeviceIdentity::new(SONY_VENDOR_ID, sony_pids::DS4_V2))?;
    let delays: Vec<_> = sent.iter().map(|r| r.delay_ms).collect();
    assert_eq!(delays, vec![None, Some(500)]);
    assert_snapshot!(
        head(sent.first()),
        @"[11, C0, 00, 01, 00, 00, FF, 00, 00, 00, 00, 00, 00, 00, 00, 00]"
    );
    assert_snapshot!(
        head(sent.get(1)),
        @"[11, C0, 00, 01, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]"
    );
    Ok(())
}

#[test]
fn test_dualsense_rumble_continues_sequence() -> TestResult {
    // the seat indicators already used sequence numbers 0 and 1
    let sent = play(DeviceIdentity::new(SONY_VENDOR_ID, sony_pids::DUALSENSE))?;
    let delays: Vec<_> = sent.iter().map(|r| r.delay_ms).collect();
    assert_eq!(delays, vec![None, Some(500)]);
    assert_snapshot!(
        head(sent.first()),
        @"[31, 20, 10, 03, 00, FF, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]"
    );
    assert_snapshot!(
        head(sent.get(1)),
        @"[31, 30, 10, 03, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00, 00]"
    );
    Ok(())
}

#[test]
fn test_start_delay_defers_first_report() -> TestResult {
    let (transport, manager) = ready_device(DeviceIdentity::new(SONY_VENDOR_ID, sony_pids::DS4_V2))?;
    manager.play_dual_rumble(HANDLE, RumbleRequest::new(100, 250, 0, 128))?;
    let delays: Vec<_> = transport.sent().iter().map(|r| r.delay_ms).collect();
    assert_eq!(delays, vec![Some(100), Some(350)]);
    Ok(())
}
