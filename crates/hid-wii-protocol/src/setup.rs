//! Extension detection and reporting-mode negotiation.
//!
//! ```text
//! status request ─▶ status ─┬─ no extension ─────────────────────────┐
//!                           └─ init 0x55 ─▶ ack ─▶ init 0x00 ─▶ ack  │
//!                                ─▶ read id ─▶ reply ─▶ ─────────────┴─▶ set mode ─▶ ready
//! ```
//!
//! The remote sends an unsolicited status report whenever an extension is
//! plugged or unplugged, and stops streaming data until the mode is set
//! again, so any status report restarts detection.

#![deny(static_mut_refs)]

use crate::ids::{registers, report_ids};
use crate::input::WiiReport;
use crate::output::{
    WiiOutput, build_read_register, build_reporting_mode, build_status_request,
    build_write_register,
};
use crate::types::WiiExtension;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WiiSetupStep {
    #[default]
    AwaitStatus,
    AwaitInit1,
    AwaitInit2,
    AwaitExtensionId,
    Ready,
}

/// What the driver should do after feeding a report to [`WiiSetup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    /// Nothing to send; keep waiting.
    Wait,
    Send(WiiOutput),
    /// Send the mode report; the remote is ready once it is out.
    Finish(WiiOutput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WiiSetup {
    pub step: WiiSetupStep,
    pub extension: WiiExtension,
}

impl WiiSetup {
    /// First request; resets any previous detection.
    pub fn start(&mut self) -> WiiOutput {
        self.step = WiiSetupStep::AwaitStatus;
        self.extension = WiiExtension::None;
        build_status_request(false)
    }

    pub fn is_ready(&self) -> bool {
        self.step == WiiSetupStep::Ready
    }

    pub fn on_report(&mut self, report: &WiiReport<'_>) -> SetupAction {
        match (*report, self.step) {
            (WiiReport::Status(status), _) => {
                if status.extension_connected {
                    self.step = WiiSetupStep::AwaitInit1;
                    SetupAction::Send(build_write_register(
                        registers::EXTENSION_INIT_1,
                        &[registers::EXTENSION_INIT_1_VALUE],
                        false,
                    ))
                } else {
                    self.finish(WiiExtension::None)
                }
            }
            (WiiReport::Ack { report, error }, WiiSetupStep::AwaitInit1)
                if report == report_ids::WRITE_MEMORY =>
            {
                if error != 0 {
                    return self.finish(WiiExtension::None);
                }
                self.step = WiiSetupStep::AwaitInit2;
                SetupAction::Send(build_write_register(
                    registers::EXTENSION_INIT_2,
                    &[registers::EXTENSION_INIT_2_VALUE],
                    false,
                ))
            }
            (WiiReport::Ack { report, error }, WiiSetupStep::AwaitInit2)
                if report == report_ids::WRITE_MEMORY =>
            {
                if error != 0 {
                    return self.finish(WiiExtension::None);
                }
                self.step = WiiSetupStep::AwaitExtensionId;
                SetupAction::Send(build_read_register(
                    registers::EXTENSION_ID,
                    registers::EXTENSION_ID_LEN,
                    false,
                ))
            }
            (WiiReport::ReadReply { error, data, .. }, WiiSetupStep::AwaitExtensionId) => {
                let id: Option<[u8; 6]> = data.get(..6).and_then(|d| d.try_into().ok());
                match (error, id) {
                    (0, Some(id)) => self.finish(WiiExtension::from_id(id)),
                    _ => self.finish(WiiExtension::None),
                }
            }
            _ => SetupAction::Wait,
        }
    }

    fn finish(&mut self, extension: WiiExtension) -> SetupAction {
        self.extension = extension;
        self.step = WiiSetupStep::Ready;
        SetupAction::Finish(build_reporting_mode(extension.data_mode(), false))
    }
}
