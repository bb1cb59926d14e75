//! Device lifecycle errors.

use crate::{ErrorSeverity, TransportError};

/// Failures raised by the connection state machine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// No binding rule matched the device identity.
    #[error(
        "no driver for device vendor={vendor_id:#06x}, product={product_id:#06x}, name={name:?}"
    )]
    IdentityUnresolved {
        /// Vendor id
        vendor_id: u16,
        /// Product id
        product_id: u16,
        /// Advertised name
        name: String,
    },

    /// No device record for this handle.
    #[error("unknown device handle {handle}")]
    UnknownDevice {
        /// Device handle
        handle: u32,
    },

    /// The event is not valid in the record's current state.
    #[error("device {handle} cannot handle this event in state {state}")]
    InvalidState {
        /// Device handle
        handle: u32,
        /// Current state name
        state: &'static str,
    },

    /// The application refused the device.
    #[error("device rejected: {0}")]
    Rejected(String),

    /// Every seat is taken.
    #[error("no free seat for device {handle}")]
    NoFreeSeat {
        /// Device handle
        handle: u32,
    },

    /// Setup negotiation could not be sent.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl LifecycleError {
    /// Create an unresolved-identity error.
    pub fn unresolved(vendor_id: u16, product_id: u16, name: impl Into<String>) -> Self {
        LifecycleError::IdentityUnresolved {
            vendor_id,
            product_id,
            name: name.into(),
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LifecycleError::IdentityUnresolved { .. } => ErrorSeverity::Warning,
            LifecycleError::UnknownDevice { .. } => ErrorSeverity::Error,
            LifecycleError::InvalidState { .. } => ErrorSeverity::Error,
            LifecycleError::Rejected(_) => ErrorSeverity::Info,
            LifecycleError::NoFreeSeat { .. } => ErrorSeverity::Warning,
            LifecycleError::Transport(e) => e.severity(),
        }
    }

    /// Whether the transport should drop the link.
    pub fn should_disconnect(&self) -> bool {
        matches!(
            self,
            LifecycleError::IdentityUnresolved { .. }
                | LifecycleError::Rejected(_)
                | LifecycleError::Transport(TransportError::Disconnected)
        )
    }
}
