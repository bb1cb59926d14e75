//! Centralized error types for padbridge
//!
//! Every failure the bridge can report is one of a small number of families:
//!
//! - [`DecodeError`]: a malformed or truncated input report. Confined to one
//!   device record; the report is dropped and the previous state is kept.
//! - [`OutputError`]: an output request that could not be honoured, either
//!   because the bound driver lacks the capability or the transport failed.
//! - [`TransportError`]: a send that failed or timed out. Returned once,
//!   never retried.
//! - [`LifecycleError`]: identity resolution and state-machine failures that
//!   escalate to the connection manager.
//! - [`CapacityExceeded`]: a fixed-capacity buffer refused an element.
//! - [`ConfigError`]: missing or malformed configuration.
//!
//! # Example
//!
//! ```
//! use padbridge_errors::{DecodeError, ErrorSeverity};
//!
//! let err = DecodeError::truncated("xbox", 16, 3);
//! assert_eq!(err.severity(), ErrorSeverity::Info);
//! assert!(err.to_string().contains("16"));
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod decode;
pub mod lifecycle;
pub mod output;
mod severity;

pub use config::ConfigError;
pub use decode::DecodeError;
pub use lifecycle::LifecycleError;
pub use output::{CapacityExceeded, OutputError, TransportError};
pub use severity::ErrorSeverity;
