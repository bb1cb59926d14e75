//! Input report decode errors.

use crate::ErrorSeverity;

/// A raw report that could not be mapped onto the canonical state.
///
/// Decode errors never leave the device record they were raised for: the
/// report is dropped and the last good snapshot stays in place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The report is shorter than the layout requires.
    #[error("{family} report truncated: expected at least {expected} bytes, got {actual}")]
    Truncated {
        /// Controller family name
        family: &'static str,
        /// Minimum byte count for this report
        expected: usize,
        /// Bytes actually received
        actual: usize,
    },

    /// The report id is not one this family decodes.
    #[error("{family} report id {report_id:#04x} not handled")]
    UnknownReport {
        /// Controller family name
        family: &'static str,
        /// First byte of the report
        report_id: u8,
    },

    /// A descriptor-driven driver received a report without a resolved layout.
    #[error("no resolved report layout for {family}")]
    MissingLayout {
        /// Controller family name
        family: &'static str,
    },

    /// The report is long enough but its contents are inconsistent.
    #[error("{family} report malformed: {reason}")]
    Malformed {
        /// Controller family name
        family: &'static str,
        /// What was wrong
        reason: &'static str,
    },
}

impl DecodeError {
    /// Create a truncated-report error.
    pub fn truncated(family: &'static str, expected: usize, actual: usize) -> Self {
        DecodeError::Truncated {
            family,
            expected,
            actual,
        }
    }

    /// Create an unknown-report error.
    pub fn unknown_report(family: &'static str, report_id: u8) -> Self {
        DecodeError::UnknownReport { family, report_id }
    }

    /// Create a malformed-report error.
    pub fn malformed(family: &'static str, reason: &'static str) -> Self {
        DecodeError::Malformed { family, reason }
    }

    /// Decode errors are expected on radio links and only logged at debug.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DecodeError::Truncated { .. } | DecodeError::UnknownReport { .. } => {
                ErrorSeverity::Info
            }
            DecodeError::MissingLayout { .. } | DecodeError::Malformed { .. } => {
                ErrorSeverity::Warning
            }
        }
    }

    /// Family the error was raised by.
    pub fn family(&self) -> &'static str {
        match self {
            DecodeError::Truncated { family, .. }
            | DecodeError::UnknownReport { family, .. }
            | DecodeError::MissingLayout { family }
            | DecodeError::Malformed { family, .. } => family,
        }
    }
}
