//! Connection setup sequence.
//!
//! Each step sends one subcommand and waits for its `0x21` reply before
//! the next is issued. Input stays in simple mode until the last step.

#![deny(static_mut_refs)]

use crate::ids::{INPUT_MODE_FULL, spi, subcommands};
use crate::output::{SUBCOMMAND_REPORT_LEN, build_subcommand_report};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    DeviceInfo,
    ReadStickCalibration,
    EnableImu,
    EnableVibration,
    SetInputMode,
    Done,
}

impl SetupStep {
    pub const FIRST: Self = Self::DeviceInfo;

    /// Subcommand whose reply completes this step.
    pub fn subcommand(self) -> Option<u8> {
        match self {
            Self::DeviceInfo => Some(subcommands::REQUEST_DEVICE_INFO),
            Self::ReadStickCalibration => Some(subcommands::SPI_FLASH_READ),
            Self::EnableImu => Some(subcommands::ENABLE_IMU),
            Self::EnableVibration => Some(subcommands::ENABLE_VIBRATION),
            Self::SetInputMode => Some(subcommands::SET_INPUT_MODE),
            Self::Done => None,
        }
    }

    pub fn build_request(self, counter: u8) -> Option<[u8; SUBCOMMAND_REPORT_LEN]> {
        let sub = self.subcommand()?;
        let report = match self {
            Self::ReadStickCalibration => {
                let addr = spi::FACTORY_STICK_CALIBRATION.to_le_bytes();
                let [a0, a1, a2, a3] = addr;
                build_subcommand_report(
                    counter,
                    sub,
                    &[a0, a1, a2, a3, spi::FACTORY_STICK_CALIBRATION_LEN],
                )
            }
            Self::EnableImu | Self::EnableVibration => build_subcommand_report(counter, sub, &[0x01]),
            Self::SetInputMode => build_subcommand_report(counter, sub, &[INPUT_MODE_FULL]),
            Self::DeviceInfo | Self::Done => build_subcommand_report(counter, sub, &[]),
        };
        Some(report)
    }

    pub fn next(self) -> Self {
        match self {
            Self::DeviceInfo => Self::ReadStickCalibration,
            Self::ReadStickCalibration => Self::EnableImu,
            Self::EnableImu => Self::EnableVibration,
            Self::EnableVibration => Self::SetInputMode,
            Self::SetInputMode | Self::Done => Self::Done,
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// Split an SPI read reply into its address and payload.
pub fn parse_spi_read_reply(data: &[u8]) -> Option<(u32, &[u8])> {
    let header: [u8; 4] = data.get(..4)?.try_into().ok()?;
    let len = usize::from(*data.get(4)?);
    let payload = data.get(5..5 + len)?;
    Some((u32::from_le_bytes(header), payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        let mut step = SetupStep::FIRST;
        let mut subs = Vec::new();
        while let Some(sub) = step.subcommand() {
            subs.push(sub);
            step = step.next();
        }
        assert_eq!(subs, vec![0x02, 0x10, 0x40, 0x48, 0x03]);
        assert!(step.is_done());
        assert_eq!(SetupStep::Done.build_request(0), None);
    }

    #[test]
    fn test_spi_request_args() -> Result<(), Box<dyn std::error::Error>> {
        let out = SetupStep::ReadStickCalibration
            .build_request(2)
            .ok_or("no request")?;
        assert_eq!(out[10], 0x10);
        assert_eq!(&out[11..16], &[0x3D, 0x60, 0x00, 0x00, 18]);
        Ok(())
    }

    #[test]
    fn test_spi_reply_split() {
        let data = [0x3D, 0x60, 0x00, 0x00, 0x02, 0xAB, 0xCD, 0x00];
        assert_eq!(parse_spi_read_reply(&data), Some((0x603D, &[0xAB, 0xCD][..])));
        assert_eq!(parse_spi_read_reply(&data[..6]), None);
    }
}
