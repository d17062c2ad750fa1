//! Signal facade: turn expiry or cancellation into one value on a channel.

use crossbeam::channel::{self, Receiver};
use std::time::Duration;

use crate::config::{RepeatPolicy, WatchdogConfig};
use crate::engine;
use crate::error::WatchdogResult;
use crate::pet::Pet;
use crate::status::Status;

/// Arm a one-shot watchdog that reports through a channel.
///
/// The receiver yields exactly one [`Status`], [`Status::Expired`] or
/// [`Status::Cancelled`], and is disconnected afterwards. The channel holds
/// one value, so the watchdog thread never blocks on a consumer that does
/// not read.
///
/// Unlike a plain `bool` notification, which reads the same for both causes,
/// the [`Status`] tells the consumer whether the work stalled or the
/// watchdog was stopped on purpose.
///
/// # Errors
///
/// Returns an error if `interval` is zero or the thread cannot be spawned.
pub fn channel(interval: Duration) -> WatchdogResult<(Receiver<Status>, Pet)> {
    let config = WatchdogConfig {
        interval,
        repeat: RepeatPolicy::Once,
        name: "heartbeat-signal".to_string(),
    };
    arm(&config)
}

/// Arm a signal watchdog from a full configuration.
///
/// The repeat policy is forced to [`RepeatPolicy::Once`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the thread cannot be spawned.
pub fn arm(config: &WatchdogConfig) -> WatchdogResult<(Receiver<Status>, Pet)> {
    let config = WatchdogConfig {
        repeat: RepeatPolicy::Once,
        ..config.clone()
    };

    let (result_tx, result_rx) = channel::bounded(1);
    let mut result_tx = Some(result_tx);

    let pet = engine::arm(
        &config,
        move |status| {
            // Taking the sender drops it after the send, which closes the channel.
            if let Some(tx) = result_tx.take()
                && tx.try_send(status).is_err()
            {
                tracing::debug!(status = %status, "Signal receiver already gone");
            }
        },
        None,
    )?;

    Ok((result_rx, pet))
}
