//! Abort facade: kill the process when the work stops calling in.
//!
//! On expiry the watchdog thread panics with a [`HeartbeatExpired`] payload.
//! The unwind is caught at the thread boundary and handed to the optional
//! cleanup hook, which may suppress termination by returning
//! [`Recovery::Recover`]. Without a hook, or when the hook returns
//! [`Recovery::Terminate`], the process is aborted.
//!
//! The expiry is a real panic, so it goes through the process panic hook:
//! even an expiry the cleanup hook recovers from prints the usual
//! `thread 'heartbeat-abort' panicked at ...` line to stderr. Install a custom
//! hook with [`std::panic::set_hook`] to silence or reroute it.
//!
//! Builds with `panic = "abort"` never reach the cleanup hook: the first
//! panic ends the process.

use std::panic;
use std::process;
use std::time::Duration;

use crate::config::{RepeatPolicy, WatchdogConfig};
use crate::engine::{self, ExitHook, UnwindPayload};
use crate::error::{HeartbeatExpired, WatchdogResult};
use crate::pet::Pet;
use crate::status::Status;

/// Decision returned by an abort cleanup hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Swallow the expiry; the watchdog thread exits and the process keeps running.
    Recover,
    /// Let the expiry terminate the process.
    Terminate,
}

/// Arm an abort watchdog with no cleanup hook.
///
/// An empty `message` is replaced with the default expiry text.
///
/// # Errors
///
/// Returns an error if `interval` is zero or the thread cannot be spawned.
pub fn heartbeat(interval: Duration, message: impl Into<String>) -> WatchdogResult<Pet> {
    arm(
        &abort_config(interval),
        message,
        None::<fn(Option<&HeartbeatExpired>) -> Recovery>,
    )
}

/// Arm an abort watchdog whose `cleanup` hook runs whenever the watchdog thread exits.
///
/// The hook receives `Some` with the expiry after the interval elapsed and
/// `None` after a cancellation; the return value only matters for an expiry.
///
/// # Errors
///
/// Returns an error if `interval` is zero or the thread cannot be spawned.
pub fn heartbeat_with_cleanup<C>(
    interval: Duration,
    message: impl Into<String>,
    cleanup: C,
) -> WatchdogResult<Pet>
where
    C: FnOnce(Option<&HeartbeatExpired>) -> Recovery + Send + 'static,
{
    arm(&abort_config(interval), message, Some(cleanup))
}

/// Arm an abort watchdog from a full configuration.
///
/// The repeat policy is forced to [`RepeatPolicy::Once`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the thread cannot be spawned.
pub fn arm<C>(
    config: &WatchdogConfig,
    message: impl Into<String>,
    cleanup: Option<C>,
) -> WatchdogResult<Pet>
where
    C: FnOnce(Option<&HeartbeatExpired>) -> Recovery + Send + 'static,
{
    let config = WatchdogConfig {
        repeat: RepeatPolicy::Once,
        ..config.clone()
    };
    let expired = HeartbeatExpired::new(message);
    let name = config.name.clone();

    let reaction = move |status: Status| {
        if status == Status::Expired {
            panic::panic_any(expired.clone());
        }
    };

    let on_exit: ExitHook = Box::new(move |payload: Option<UnwindPayload>| {
        let Some(payload) = payload else {
            if let Some(cleanup) = cleanup {
                cleanup(None);
            }
            return;
        };

        let expired = match payload.downcast::<HeartbeatExpired>() {
            Ok(expired) => expired,
            Err(other) => panic::resume_unwind(other),
        };

        let recovery =
            cleanup.map_or(Recovery::Terminate, |cleanup| cleanup(Some(&*expired)));
        if recovery == Recovery::Recover {
            tracing::info!(
                name = %name,
                message = expired.message(),
                "Heartbeat expiry recovered"
            );
            return;
        }

        tracing::error!(
            name = %name,
            message = expired.message(),
            "Heartbeat expired, aborting process"
        );
        process::abort();
    });

    engine::arm(&config, reaction, Some(on_exit))
}

fn abort_config(interval: Duration) -> WatchdogConfig {
    WatchdogConfig {
        interval,
        repeat: RepeatPolicy::Once,
        name: "heartbeat-abort".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_cleanup_observes_message_and_recovers() -> TestResult {
        let (tx, rx) = channel::bounded(1);
        let _pet = heartbeat_with_cleanup(Duration::from_millis(20), "stalled", move |expired| {
            let _sent = tx.try_send(expired.map(|e| e.message().to_string()));
            Recovery::Recover
        })?;

        let seen = rx.recv_timeout(Duration::from_secs(2))?;
        assert_eq!(seen.as_deref(), Some("stalled"));
        Ok(())
    }

    #[test]
    fn test_empty_message_uses_default() -> TestResult {
        let (tx, rx) = channel::bounded(1);
        let _pet = heartbeat_with_cleanup(Duration::from_millis(20), "", move |expired| {
            let _sent = tx.try_send(expired.map(|e| e.message().to_string()));
            Recovery::Recover
        })?;

        let seen = rx.recv_timeout(Duration::from_secs(2))?;
        assert_eq!(seen.as_deref(), Some("Heartbeat timer expired."));
        Ok(())
    }

    #[test]
    fn test_cancel_runs_cleanup_without_expiry() -> TestResult {
        let (tx, rx) = channel::bounded(1);
        let pet = heartbeat_with_cleanup(Duration::from_secs(60), "never", move |expired| {
            let _sent = tx.try_send(expired.is_some());
            Recovery::Terminate
        })?;

        while !pet.try_pet(true) {
            std::thread::sleep(Duration::from_millis(1));
        }

        let expired = rx.recv_timeout(Duration::from_secs(2))?;
        assert!(!expired);
        Ok(())
    }

    #[test]
    fn test_repeat_policy_is_forced_once() -> TestResult {
        let (tx, rx) = channel::unbounded();
        let config = WatchdogConfig::rearm(Duration::from_millis(10));
        let _pet = arm(
            &config,
            "forced",
            Some(move |expired: Option<&HeartbeatExpired>| {
                let _sent = tx.send(expired.is_some());
                Recovery::Recover
            }),
        )?;

        assert!(rx.recv_timeout(Duration::from_secs(2))?);
        std::thread::sleep(Duration::from_millis(60));
        assert!(rx.try_recv().is_err());
        Ok(())
    }
}
