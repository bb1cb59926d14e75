//! Configuration errors.

use crate::ErrorSeverity;

/// Missing or malformed configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required property is absent from the store.
    #[error("required property '{0}' is not set")]
    MissingProperty(String),

    /// A property is present but has the wrong type or an unusable value.
    #[error("property '{key}' is invalid: {reason}")]
    InvalidProperty {
        /// Property key
        key: String,
        /// What was wrong
        reason: String,
    },

    /// A JSON configuration document failed to parse.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ConfigError {
    /// Create an invalid-property error.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidProperty {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}
