//! Reaction causes and watchdog lifecycle states.

use serde::{Deserialize, Serialize};

/// Why a reaction is being invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// The interval elapsed with no reset.
    Expired,
    /// An explicit stop was requested.
    Cancelled,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Expired => write!(f, "Expired"),
            Status::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Lifecycle state of a watchdog as seen from its control handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WatchdogState {
    /// Background thread is waiting for a reset or the deadline.
    #[default]
    Armed,
    /// Fired in one-shot mode; the thread has exited.
    Expired,
    /// Stopped by `pet(true)`; the thread has exited.
    Cancelled,
    /// Every handle was dropped while repeating; the thread has exited.
    Abandoned,
}

impl WatchdogState {
    /// Whether the background thread has left its loop.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, WatchdogState::Armed)
    }
}

impl From<Status> for WatchdogState {
    fn from(status: Status) -> Self {
        match status {
            Status::Expired => WatchdogState::Expired,
            Status::Cancelled => WatchdogState::Cancelled,
        }
    }
}

impl std::fmt::Display for WatchdogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchdogState::Armed => write!(f, "Armed"),
            WatchdogState::Expired => write!(f, "Expired"),
            WatchdogState::Cancelled => write!(f, "Cancelled"),
            WatchdogState::Abandoned => write!(f, "Abandoned"),
        }
    }
}
