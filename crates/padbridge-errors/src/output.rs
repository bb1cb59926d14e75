//! Output path and transport errors.

use crate::ErrorSeverity;

/// Failure reported by the Bluetooth/BLE transport.
///
/// The core never retries: a failed send surfaces exactly once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The transport refused or failed to queue the report.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// The send did not complete in time.
    #[error("send timed out after {timeout_ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        timeout_ms: u64,
    },

    /// The link is already down.
    #[error("device disconnected")]
    Disconnected,
}

impl TransportError {
    /// Create a send-failed error.
    pub fn send_failed(reason: impl Into<String>) -> Self {
        TransportError::SendFailed(reason.into())
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TransportError::SendFailed(_) => ErrorSeverity::Error,
            TransportError::Timeout { .. } => ErrorSeverity::Warning,
            TransportError::Disconnected => ErrorSeverity::Critical,
        }
    }

    /// Whether the caller may try the same request again.
    ///
    /// Retrying is always the caller's decision.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }
}

/// An output request that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutputError {
    /// The bound driver does not implement the requested capability.
    #[error("capability '{capability}' not supported by this device")]
    UnsupportedCapability {
        /// Capability name
        capability: &'static str,
    },

    /// Output requested before the device finished setup.
    #[error("device {handle} is not ready for output")]
    NotReady {
        /// Device handle
        handle: u32,
    },

    /// No device record for this handle.
    #[error("unknown device handle {handle}")]
    UnknownDevice {
        /// Device handle
        handle: u32,
    },

    /// The transport failed to send the encoded report.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl OutputError {
    /// Create an unsupported-capability error.
    pub fn unsupported(capability: &'static str) -> Self {
        OutputError::UnsupportedCapability { capability }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OutputError::UnsupportedCapability { .. } => ErrorSeverity::Error,
            OutputError::NotReady { .. } => ErrorSeverity::Warning,
            OutputError::UnknownDevice { .. } => ErrorSeverity::Error,
            OutputError::Transport(e) => e.severity(),
        }
    }

    /// A caller error: the request should have been checked beforehand.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            OutputError::UnsupportedCapability { .. }
                | OutputError::NotReady { .. }
                | OutputError::UnknownDevice { .. }
        )
    }
}

/// A fixed-capacity buffer refused another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("capacity of {capacity} exceeded")]
pub struct CapacityExceeded {
    /// Buffer capacity
    pub capacity: usize,
}
