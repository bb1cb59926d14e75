//! Error types for padctl

use padbridge_errors::{ConfigError, DecodeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    #[error("No driver binds {0}")]
    NoDriver(String),

    #[error("Report rejected: {0}")]
    Decode(#[from] DecodeError),

    #[error("Invalid capture: {0}")]
    InvalidCapture(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoDriver(_) => 2,
            CliError::Decode(_) => 3,
            CliError::InvalidHex(_)
            | CliError::InvalidCapture(_)
            | CliError::Config(_)
            | CliError::JsonError(_) => 4,
            CliError::IoError(_) => 5,
        }
    }
}
