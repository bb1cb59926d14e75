//! Feeds a stream of reports through every driver family.
//!
//! The first byte picks the family, the rest is split into reports at
//! every 0xFF byte.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_driver_stream
#![no_main]
use libfuzzer_sys::fuzz_target;
use padbridge_engine::{DriverFamily, OutputSink, create_driver};
use padbridge_hid_common::DeviceIdentity;
use padbridge_hid_common::mock::MockTransport;
use padbridge_model::Controller;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let families = DriverFamily::ALL;
    let Some(&family) = families.get(usize::from(selector) % families.len()) else {
        return;
    };

    let transport = MockTransport::new();
    let mut sink = OutputSink::new(&transport, 1);
    let mut driver = create_driver(family, &DeviceIdentity::default());
    let _ = driver.setup(&mut sink);
    let mut controller = Controller::default();
    for report in rest.split(|b| *b == 0xFF) {
        driver.init_report(&mut controller);
        let _ = driver.parse_input_report(&mut controller, report, &mut sink);
        let _ = driver.parse_feature_report(&mut controller, report, &mut sink);
    }
});
