//! Property-based tests for the Switch protocol crate.

use padbridge_errors::DecodeError;
use padbridge_hid_nintendo_protocol as switch;
use padbridge_model::gamepad::{AXIS_MAX, AXIS_MIN, PEDAL_MAX};
use proptest::prelude::*;

fn models() -> impl Strategy<Value = switch::SwitchModel> {
    prop_oneof![
        Just(switch::SwitchModel::ProController),
        Just(switch::SwitchModel::JoyConLeft),
        Just(switch::SwitchModel::JoyConRight),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_parse_never_panics(
        bytes in proptest::collection::vec(any::<u8>(), 0..64),
        model in models(),
    ) {
        match switch::parse_input_report(&bytes) {
            Ok(switch::SwitchReport::Input(state))
            | Ok(switch::SwitchReport::SubcommandReply { state, .. }) => {
                let cal = switch::StickCalibration::default();
                let gp = state.to_gamepad(model, &cal, &cal);
                for axis in [gp.axis_x, gp.axis_y, gp.axis_rx, gp.axis_ry] {
                    prop_assert!((AXIS_MIN..=AXIS_MAX).contains(&axis));
                }
                prop_assert!((0..=PEDAL_MAX).contains(&gp.brake));
                prop_assert!(state.battery() >= 1);
            }
            Err(DecodeError::Truncated { expected, actual, .. }) => {
                prop_assert!(actual < expected);
            }
            Err(_) => {}
        }
    }

    /// Calibration from arbitrary flash contents still yields in-range axes.
    #[test]
    fn prop_calibrated_axes_in_range(
        block in proptest::array::uniform18(any::<u8>()),
        x in 0u16..4096,
        y in 0u16..4096,
    ) {
        if let Some((left, right)) = switch::parse_factory_stick_calibration(&block) {
            for cal in [left, right] {
                let (nx, ny) = cal.normalize(x, y);
                prop_assert!((AXIS_MIN..=AXIS_MAX).contains(&nx));
                prop_assert!((AXIS_MIN..=AXIS_MAX).contains(&ny));
            }
        }
    }

    #[test]
    fn prop_rumble_counter_masked(counter: u8, weak: u8, strong: u8) {
        let out = switch::build_rumble_report(counter, weak, strong);
        prop_assert_eq!(out.first().copied(), Some(0x10));
        prop_assert!(out.get(1).is_some_and(|c| *c <= 0x0F));
    }
}
