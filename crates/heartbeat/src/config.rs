//! Watchdog configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{WatchdogError, WatchdogResult};

/// What the engine does after the interval elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RepeatPolicy {
    /// Fire once and terminate.
    #[default]
    Once,
    /// Fire, re-arm for another interval and keep waiting.
    Rearm,
}

/// Configuration for a single watchdog instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchdogConfig {
    /// Maximum time allowed between resets.
    pub interval: Duration,
    /// Whether the watchdog re-arms after firing.
    pub repeat: RepeatPolicy,
    /// Name given to the background thread and used in log events.
    pub name: String,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            repeat: RepeatPolicy::Once,
            name: "heartbeat".to_string(),
        }
    }
}

impl WatchdogConfig {
    /// One-shot configuration with the given interval.
    #[must_use]
    pub fn once(interval: Duration) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Repeating configuration with the given interval.
    #[must_use]
    pub fn rearm(interval: Duration) -> Self {
        Self {
            interval,
            repeat: RepeatPolicy::Rearm,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or the name is empty.
    pub fn validate(&self) -> WatchdogResult<()> {
        if self.interval.is_zero() {
            return Err(WatchdogError::invalid_configuration(
                "interval must be greater than 0",
            ));
        }
        if self.name.is_empty() {
            return Err(WatchdogError::invalid_configuration(
                "name must not be empty",
            ));
        }
        Ok(())
    }

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> WatchdogConfigBuilder {
        WatchdogConfigBuilder::default()
    }
}

/// Builder for `WatchdogConfig`.
#[derive(Debug, Default)]
pub struct WatchdogConfigBuilder {
    config: WatchdogConfig,
}

impl WatchdogConfigBuilder {
    /// Set the reset interval.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.config.interval = interval;
        self
    }

    /// Set the repeat policy.
    #[must_use]
    pub fn repeat(mut self, repeat: RepeatPolicy) -> Self {
        self.config.repeat = repeat;
        self
    }

    /// Set the thread and log name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<WatchdogConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
