//! Transport seam
//!
//! The Bluetooth/BLE stack owns the radio. The core only hands it finished
//! report bytes. Sends may block; callers treat them as blocking I/O.

use padbridge_errors::TransportError;

/// Opaque per-connection handle assigned by the transport.
pub type DeviceHandle = u32;

/// Outgoing half of the host Bluetooth/BLE stack.
pub trait Transport: Send + Sync {
    /// Send one output report, report id first, HIDP header excluded.
    fn send_output_report(&self, handle: DeviceHandle, report: &[u8])
    -> Result<(), TransportError>;

    /// Send one output report after `delay_ms` milliseconds.
    ///
    /// Used for rumble start delays and for the "stop" report that ends a
    /// timed effect on pads without native duration support.
    fn send_output_report_after(
        &self,
        handle: DeviceHandle,
        delay_ms: u32,
        report: &[u8],
    ) -> Result<(), TransportError>;

    /// Ask the device for a feature report. The reply comes back through
    /// the feature report delivery path.
    fn request_feature_report(
        &self,
        handle: DeviceHandle,
        report_id: u8,
    ) -> Result<(), TransportError>;
}
