//! Driver binding rules
//!
//! A device is bound to a driver family by walking [`BINDING_RULES`] one
//! priority class at a time: exact vendor/product ids first, then name
//! substrings, then the Class of Device heuristic. Inside a class the first
//! matching rule wins, so more specific names are listed before the generic
//! ones they contain.

use padbridge_hid_common::DeviceIdentity;
use padbridge_hid_nintendo_protocol::{NINTENDO_VENDOR_ID, product_ids as switch_pids};
use padbridge_hid_sony_protocol::{SONY_VENDOR_ID, product_ids as sony_pids};
use padbridge_hid_wii_protocol::{names as wii_names, product_ids as wii_pids};
use padbridge_hid_xbox_protocol::{MICROSOFT_VENDOR_ID, product_ids as xbox_pids};
use serde::Serialize;
use tracing::debug;

use crate::driver::DriverFamily;

/// Rule priority classes, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Ids,
    Name,
    ClassOfDevice,
}

impl RuleKind {
    pub const ALL: [RuleKind; 3] = [RuleKind::Ids, RuleKind::Name, RuleKind::ClassOfDevice];
}

#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Ids {
        vendor_id: u16,
        product_ids: &'static [u16],
    },
    NameContains(&'static str),
    ClassOfDevice(fn(&DeviceIdentity) -> bool),
}

impl Matcher {
    pub fn matches(&self, identity: &DeviceIdentity) -> bool {
        match self {
            Matcher::Ids {
                vendor_id,
                product_ids,
            } => identity.vendor_id == *vendor_id && product_ids.contains(&identity.product_id),
            Matcher::NameContains(needle) => {
                !identity.name.is_empty() && identity.name.contains(needle)
            }
            Matcher::ClassOfDevice(pred) => pred(identity),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BindingRule {
    pub kind: RuleKind,
    pub matcher: Matcher,
    pub family: DriverFamily,
}

impl BindingRule {
    const fn ids(vendor_id: u16, product_ids: &'static [u16], family: DriverFamily) -> Self {
        Self {
            kind: RuleKind::Ids,
            matcher: Matcher::Ids {
                vendor_id,
                product_ids,
            },
            family,
        }
    }

    const fn name(needle: &'static str, family: DriverFamily) -> Self {
        Self {
            kind: RuleKind::Name,
            matcher: Matcher::NameContains(needle),
            family,
        }
    }

    const fn cod(pred: fn(&DeviceIdentity) -> bool, family: DriverFamily) -> Self {
        Self {
            kind: RuleKind::ClassOfDevice,
            matcher: Matcher::ClassOfDevice(pred),
            family,
        }
    }
}

fn cod_gamepad(identity: &DeviceIdentity) -> bool {
    identity.class_of_device.is_gamepad()
}

fn cod_pointing(identity: &DeviceIdentity) -> bool {
    identity.class_of_device.is_pointing() && !identity.class_of_device.is_gamepad()
}

fn cod_keyboard(identity: &DeviceIdentity) -> bool {
    identity.class_of_device.is_keyboard() && !identity.class_of_device.is_gamepad()
}

const DS4_PIDS: &[u16] = &[sony_pids::DS4_V1, sony_pids::DS4_V2, sony_pids::DS4_DONGLE];
const DUALSENSE_PIDS: &[u16] = &[sony_pids::DUALSENSE, sony_pids::DUALSENSE_EDGE];
const XBOX_PIDS: &[u16] = &[
    xbox_pids::XBOX_ONE_S_V1,
    xbox_pids::XBOX_ONE_S_V2,
    xbox_pids::ELITE_SERIES_2,
    xbox_pids::SERIES_XS_BLE,
    xbox_pids::ELITE_SERIES_2_BLE,
];
const SWITCH_PIDS: &[u16] = &[
    switch_pids::JOYCON_L,
    switch_pids::JOYCON_R,
    switch_pids::PRO_CONTROLLER,
];
const WII_PIDS: &[u16] = &[wii_pids::WII_REMOTE, wii_pids::WII_REMOTE_PLUS];

/// The rule table. Order inside each [`RuleKind`] is significant.
pub static BINDING_RULES: &[BindingRule] = &[
    BindingRule::ids(SONY_VENDOR_ID, DS4_PIDS, DriverFamily::Ds4),
    BindingRule::ids(SONY_VENDOR_ID, DUALSENSE_PIDS, DriverFamily::DualSense),
    BindingRule::ids(MICROSOFT_VENDOR_ID, XBOX_PIDS, DriverFamily::Xbox),
    BindingRule::ids(NINTENDO_VENDOR_ID, SWITCH_PIDS, DriverFamily::Switch),
    BindingRule::ids(NINTENDO_VENDOR_ID, WII_PIDS, DriverFamily::Wii),
    BindingRule::name("DualSense Wireless Controller", DriverFamily::DualSense),
    BindingRule::name("DualSense Edge", DriverFamily::DualSense),
    BindingRule::name("Xbox Wireless Controller", DriverFamily::Xbox),
    BindingRule::name("Wireless Controller", DriverFamily::Ds4),
    BindingRule::name("Pro Controller", DriverFamily::Switch),
    BindingRule::name("Joy-Con", DriverFamily::Switch),
    BindingRule::name(wii_names::BALANCE_BOARD, DriverFamily::Wii),
    BindingRule::name(wii_names::REMOTE, DriverFamily::Wii),
    BindingRule::name("BLE-M3", DriverFamily::Keyboard),
    BindingRule::cod(cod_gamepad, DriverFamily::GenericGamepad),
    BindingRule::cod(cod_pointing, DriverFamily::Mouse),
    BindingRule::cod(cod_keyboard, DriverFamily::Keyboard),
];

/// First rule matching `identity`, by priority class then table order.
pub fn resolve_rule(identity: &DeviceIdentity) -> Option<&'static BindingRule> {
    RuleKind::ALL.iter().find_map(|kind| {
        BINDING_RULES
            .iter()
            .filter(|rule| rule.kind == *kind)
            .find(|rule| rule.matcher.matches(identity))
    })
}

pub fn resolve_family(identity: &DeviceIdentity) -> Option<DriverFamily> {
    let rule = resolve_rule(identity)?;
    debug!(
        "Bound {} VID=0x{:04X} PID=0x{:04X} to {} by {:?} rule",
        identity.display_name(),
        identity.vendor_id,
        identity.product_id,
        rule.family,
        rule.kind
    );
    Some(rule.family)
}
