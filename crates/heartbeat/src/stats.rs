//! Watchdog activity statistics.
//!
//! The engine thread records resets, expirations and state transitions; the
//! control handle records signals it had to drop. Both sides share one
//! [`WatchdogStats`] behind a lock and readers get a cloned snapshot.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::status::WatchdogState;

/// Counters describing what a watchdog has observed so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchdogStats {
    /// Resets received by the engine thread.
    pub resets: u64,
    /// Cancels received by the engine thread; at most one per watchdog.
    pub cancels: u64,
    /// Signals the handle could not deliver because the engine was busy or gone.
    pub dropped_signals: u64,
    /// Number of times the interval elapsed without a reset.
    pub expirations: u64,
    /// Timestamp of the last reset received by the engine.
    #[serde(skip)]
    pub last_reset: Option<Instant>,
    /// Current lifecycle state.
    pub state: WatchdogState,
}

impl WatchdogStats {
    /// Create empty statistics for a freshly armed watchdog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reset received by the engine.
    pub fn record_reset(&mut self) {
        self.resets = self.resets.saturating_add(1);
        self.last_reset = Some(Instant::now());
    }

    /// Record a cancel received by the engine.
    pub fn record_cancel(&mut self) {
        self.cancels = self.cancels.saturating_add(1);
    }

    /// Record a signal that the handle failed to deliver.
    pub fn record_dropped(&mut self) {
        self.dropped_signals = self.dropped_signals.saturating_add(1);
    }

    /// Record an expiry.
    pub fn record_expiration(&mut self) {
        self.expirations = self.expirations.saturating_add(1);
    }

    /// Move to a new lifecycle state.
    pub fn set_state(&mut self, state: WatchdogState) {
        self.state = state;
    }

    /// Time since the engine last received a reset.
    #[must_use]
    pub fn since_last_reset(&self) -> Option<Duration> {
        self.last_reset.as_ref().map(Instant::elapsed)
    }

    /// Share of attempted signals, resets and cancels alike, that were dropped,
    /// as a percentage.
    ///
    /// Returns 0.0 if nothing has been attempted.
    #[must_use]
    pub fn drop_rate(&self) -> f64 {
        let attempted = self
            .resets
            .saturating_add(self.cancels)
            .saturating_add(self.dropped_signals);
        if attempted == 0 {
            0.0
        } else {
            (self.dropped_signals as f64 / attempted as f64) * 100.0
        }
    }
}
