//! Monitoring facade: call a handler every interval without a reset.
//!
//! The watchdog re-arms after each expiry and keeps running until it is
//! cancelled, so a stalled caller sees the handler invoked once per interval.

use std::time::Duration;

use crate::config::{RepeatPolicy, WatchdogConfig};
use crate::engine;
use crate::error::WatchdogResult;
use crate::pet::Pet;
use crate::status::Status;

/// Arm a repeating watchdog that calls `on_expired` on every expiry.
///
/// Passing `None` yields a watchdog that only tracks its own statistics.
///
/// # Errors
///
/// Returns an error if `interval` is zero or the thread cannot be spawned.
pub fn monitor<F>(interval: Duration, on_expired: Option<F>) -> WatchdogResult<Pet>
where
    F: FnMut() + Send + 'static,
{
    let config = WatchdogConfig {
        interval,
        repeat: RepeatPolicy::Rearm,
        name: "heartbeat-monitor".to_string(),
    };
    arm(&config, on_expired)
}

/// Arm a monitoring watchdog from a full configuration.
///
/// The repeat policy is forced to [`RepeatPolicy::Rearm`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the thread cannot be spawned.
pub fn arm<F>(config: &WatchdogConfig, mut on_expired: Option<F>) -> WatchdogResult<Pet>
where
    F: FnMut() + Send + 'static,
{
    let config = WatchdogConfig {
        repeat: RepeatPolicy::Rearm,
        ..config.clone()
    };

    engine::arm(
        &config,
        move |status| {
            if status == Status::Expired
                && let Some(handler) = on_expired.as_mut()
            {
                handler();
            }
        },
        None,
    )
}
