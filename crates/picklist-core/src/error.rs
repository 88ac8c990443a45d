//! Error types for picklist.
//!
//! Interaction operations never fail; these cover the fallible edges:
//! stopping timers, disconnecting slots and loading configuration.

use thiserror::Error;

/// The main error type for picklist operations.
#[derive(Debug, Error)]
pub enum PicklistError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),
    /// Signal-related error.
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Timer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The timer ID is invalid, already fired or already stopped.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

/// Signal-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The connection ID is invalid or has already been disconnected.
    #[error("Invalid or disconnected connection ID")]
    InvalidConnection,
}

/// Configuration parsing errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document could not be deserialized.
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// The JSON document could not be deserialized.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// A field held a value outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A specialized Result type for picklist operations.
pub type Result<T> = std::result::Result<T, PicklistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_and_display() {
        let err: PicklistError = TimerError::InvalidTimerId.into();
        assert_eq!(err.to_string(), "Timer error: Invalid or expired timer ID");

        let err: PicklistError = ConfigError::InvalidValue {
            field: "max_visible_items",
            reason: "must be at least 1".into(),
        }
        .into();
        assert!(matches!(err, PicklistError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: invalid value for `max_visible_items`: must be at least 1"
        );
    }
}
