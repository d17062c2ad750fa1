//! Error types for the heartbeat watchdog.
//!
//! Construction problems are reported through [`WatchdogError`]. Expiry of an
//! abort watchdog is not an ordinary error: it travels as the payload of an
//! unwinding panic, typed as [`HeartbeatExpired`].

use thiserror::Error;

/// Message used by the abort watchdog when the caller supplies an empty one.
pub const DEFAULT_EXPIRED_MESSAGE: &str = "Heartbeat timer expired.";

/// Errors that can occur while arming a watchdog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchdogError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The background thread could not be started.
    #[error("Failed to spawn watchdog thread: {0}")]
    SpawnFailed(String),
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    /// Create a spawn failure error.
    #[must_use]
    pub fn spawn_failed(reason: impl Into<String>) -> Self {
        Self::SpawnFailed(reason.into())
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = std::result::Result<T, WatchdogError>;

/// Terminating error raised when an abort watchdog is not petted in time.
///
/// This is the panic payload unwound through the watchdog thread. It is only
/// ever observed by a cleanup hook; it is never returned through a `Result`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HeartbeatExpired {
    message: String,
}

impl HeartbeatExpired {
    /// Create the error, substituting [`DEFAULT_EXPIRED_MESSAGE`] for an empty message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            DEFAULT_EXPIRED_MESSAGE.to_string()
        } else {
            message
        };
        Self { message }
    }

    /// The message carried by the expiry.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WatchdogError::invalid_configuration("interval must be greater than 0");
        assert!(err.to_string().contains("interval must be greater than 0"));

        let err = WatchdogError::spawn_failed("resource temporarily unavailable");
        assert!(err.to_string().starts_with("Failed to spawn"));
    }

    #[test]
    fn test_expired_default_message() {
        let expired = HeartbeatExpired::new("");
        assert_eq!(expired.message(), DEFAULT_EXPIRED_MESSAGE);
        assert_eq!(expired.to_string(), "Heartbeat timer expired.");
    }

    #[test]
    fn test_expired_custom_message() {
        let expired = HeartbeatExpired::new("ingest loop stalled");
        assert_eq!(expired.message(), "ingest loop stalled");
    }
}
