//! The background timer loop shared by every watchdog facade.
//!
//! [`arm`] starts one named thread per watchdog. The thread waits for the
//! first of two events: a reset or cancel arriving on a zero-capacity control
//! channel, or the deadline passing. All reactions run inline on that thread,
//! so a reaction is never concurrent with itself and a slow reaction simply
//! delays the next arming.
//!
//! The loop is wrapped in `catch_unwind`. An optional [`ExitHook`] runs when
//! the thread leaves the loop, normally or by unwinding, and receives the
//! unwind payload in the latter case.

use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use parking_lot::RwLock;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::config::{RepeatPolicy, WatchdogConfig};
use crate::error::{WatchdogError, WatchdogResult};
use crate::pet::{Pet, Signal};
use crate::stats::WatchdogStats;
use crate::status::{Status, WatchdogState};

/// Payload of a panic that escaped the watchdog loop.
pub type UnwindPayload = Box<dyn Any + Send + 'static>;

/// Scoped hook run on the watchdog thread when its loop exits.
///
/// Receives `None` after a normal exit and the panic payload after an unwind.
pub type ExitHook = Box<dyn FnOnce(Option<UnwindPayload>) + Send + 'static>;

/// What woke the loop up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Reset,
    Cancel,
    Elapsed,
    Abandoned,
}

struct Engine<R> {
    name: String,
    interval: Duration,
    repeat: RepeatPolicy,
    control: Option<Receiver<Signal>>,
    reaction: R,
    stats: Arc<RwLock<WatchdogStats>>,
}

/// Arm a watchdog with a custom reaction.
///
/// `reaction` is called with [`Status::Expired`] each time the interval
/// elapses without a reset and with [`Status::Cancelled`] once if the
/// watchdog is stopped through the returned [`Pet`].
///
/// If every [`Pet`] clone is dropped, a one-shot watchdog still fires when its
/// pending deadline passes, while a repeating watchdog exits silently in the
/// [`WatchdogState::Abandoned`] state.
///
/// An interval too large to add to [`Instant::now`] never elapses; such a
/// watchdog only ends through cancellation, or is abandoned once every handle
/// is dropped.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the thread cannot be spawned.
pub fn arm<R>(
    config: &WatchdogConfig,
    reaction: R,
    on_exit: Option<ExitHook>,
) -> WatchdogResult<Pet>
where
    R: FnMut(Status) + Send + 'static,
{
    config.validate()?;

    let (control_tx, control_rx) = channel::bounded(0);
    let stats = Arc::new(RwLock::new(WatchdogStats::new()));

    let engine = Engine {
        name: config.name.clone(),
        interval: config.interval,
        repeat: config.repeat,
        control: Some(control_rx),
        reaction,
        stats: Arc::clone(&stats),
    };

    thread::Builder::new()
        .name(config.name.clone())
        .spawn(move || engine.run_guarded(on_exit))
        .map_err(|e| WatchdogError::spawn_failed(e.to_string()))?;

    tracing::debug!(
        name = %config.name,
        interval = ?config.interval,
        repeat = ?config.repeat,
        "Watchdog armed"
    );

    Ok(Pet::new(control_tx, stats))
}

impl<R> Engine<R>
where
    R: FnMut(Status),
{
    fn run_guarded(mut self, on_exit: Option<ExitHook>) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run()));

        let state = {
            let mut stats = self.stats.write();
            if outcome.is_err() && !stats.state.is_terminal() {
                stats.set_state(WatchdogState::Abandoned);
            }
            stats.state
        };
        tracing::debug!(name = %self.name, state = %state, "Watchdog thread exiting");

        // Drop the receiver before the hook runs so late pets see a closed channel.
        self.control = None;

        match (outcome, on_exit) {
            (Ok(()), Some(hook)) => hook(None),
            (Ok(()), None) => {}
            (Err(payload), Some(hook)) => hook(Some(payload)),
            (Err(payload), None) => {
                tracing::error!(name = %self.name, "Watchdog reaction panicked");
                panic::resume_unwind(payload);
            }
        }
    }

    fn run(&mut self) {
        let mut deadline = self.next_deadline();
        loop {
            match self.wait(deadline) {
                Wake::Reset => {
                    self.stats.write().record_reset();
                    tracing::trace!(name = %self.name, "Watchdog reset");
                    deadline = self.next_deadline();
                }
                Wake::Cancel => {
                    {
                        let mut stats = self.stats.write();
                        stats.record_cancel();
                        stats.set_state(WatchdogState::Cancelled);
                    }
                    tracing::info!(name = %self.name, "Watchdog cancelled");
                    (self.reaction)(Status::Cancelled);
                    return;
                }
                Wake::Elapsed => {
                    let expirations = {
                        let mut stats = self.stats.write();
                        stats.record_expiration();
                        if self.repeat == RepeatPolicy::Once {
                            stats.set_state(WatchdogState::Expired);
                        }
                        stats.expirations
                    };
                    tracing::warn!(
                        name = %self.name,
                        interval = ?self.interval,
                        expirations,
                        "Watchdog expired"
                    );
                    (self.reaction)(Status::Expired);
                    if self.repeat == RepeatPolicy::Once {
                        return;
                    }
                    deadline = self.next_deadline();
                }
                Wake::Abandoned => {
                    self.stats.write().set_state(WatchdogState::Abandoned);
                    tracing::debug!(name = %self.name, "All watchdog handles dropped");
                    return;
                }
            }
        }
    }

    /// Waits for the next signal or for `deadline`; `None` means the
    /// interval does not fit in an `Instant` and the deadline never passes.
    fn wait(&mut self, deadline: Option<Instant>) -> Wake {
        let Some(control) = &self.control else {
            return Self::sleep_until(deadline);
        };

        let received = match deadline {
            Some(deadline) => control.recv_deadline(deadline),
            None => control
                .recv()
                .map_err(|_disconnected| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok(Signal::Reset) => Wake::Reset,
            Ok(Signal::Cancel) => Wake::Cancel,
            Err(RecvTimeoutError::Timeout) => Wake::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                self.control = None;
                match self.repeat {
                    RepeatPolicy::Rearm => Wake::Abandoned,
                    RepeatPolicy::Once => Self::sleep_until(deadline),
                }
            }
        }
    }

    fn sleep_until(deadline: Option<Instant>) -> Wake {
        match deadline {
            Some(deadline) => {
                thread::sleep(deadline.saturating_duration_since(Instant::now()));
                Wake::Elapsed
            }
            // Nothing can reset, cancel or expire this watchdog any more.
            None => Wake::Abandoned,
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        Instant::now().checked_add(self.interval)
    }
}
