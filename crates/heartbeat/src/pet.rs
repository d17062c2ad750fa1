//! The control handle returned by every watchdog facade.

use crossbeam::channel::{Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::stats::WatchdogStats;
use crate::status::WatchdogState;

/// Message sent from a [`Pet`] to the engine thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    /// Push the deadline out by a full interval.
    Reset,
    /// Stop the watchdog for good.
    Cancel,
}

impl Signal {
    fn from_cancel(cancel: bool) -> Self {
        if cancel { Signal::Cancel } else { Signal::Reset }
    }
}

/// Handle used to reset or cancel a running watchdog.
///
/// Delivery is best-effort: a signal only reaches the engine if its thread is
/// blocked waiting at the moment of the call. Otherwise (mid-reaction, another
/// caller won the rendezvous, or the watchdog already terminated) the signal
/// is dropped. Calls never block and never fail.
///
/// Cloning the handle is cheap; every clone controls the same watchdog.
#[derive(Clone)]
pub struct Pet {
    control: Sender<Signal>,
    stats: Arc<RwLock<WatchdogStats>>,
}

impl Pet {
    pub(crate) fn new(control: Sender<Signal>, stats: Arc<RwLock<WatchdogStats>>) -> Self {
        Self { control, stats }
    }

    /// Reset the deadline (`cancel == false`) or stop the watchdog (`cancel == true`).
    pub fn pet(&self, cancel: bool) {
        self.deliver(Signal::from_cancel(cancel));
    }

    /// Same as [`Pet::pet`], reporting whether the engine accepted the signal.
    #[must_use]
    pub fn try_pet(&self, cancel: bool) -> bool {
        self.deliver(Signal::from_cancel(cancel))
    }

    /// Reset the deadline.
    pub fn reset(&self) {
        self.deliver(Signal::Reset);
    }

    /// Stop the watchdog.
    pub fn cancel(&self) {
        self.deliver(Signal::Cancel);
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> WatchdogState {
        self.stats.read().state
    }

    /// Whether the watchdog has reached a terminal state.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state().is_terminal()
    }

    /// Snapshot of the watchdog statistics.
    #[must_use]
    pub fn stats(&self) -> WatchdogStats {
        self.stats.read().clone()
    }

    fn deliver(&self, signal: Signal) -> bool {
        match self.control.try_send(signal) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.stats.write().record_dropped();
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

impl std::fmt::Debug for Pet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pet")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
