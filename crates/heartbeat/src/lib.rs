//! # heartbeat
//!
//! Watchdog timers for detecting stalled long-running work.
//!
//! A watchdog expects to be petted at least once per interval. When petting
//! stops it reacts, in one of three ways:
//!
//! - [`abort`] - panic with a [`HeartbeatExpired`] payload on the watchdog
//!   thread and abort the process unless a cleanup hook recovers
//! - [`monitor`] - call a handler on every missed interval until cancelled
//! - [`signal`] - deliver a single [`Status`] on a channel, then close it
//!
//! All three are thin specializations of the [`engine`], which owns one
//! background thread and one zero-capacity control channel per watchdog.
//!
//! ## Delivery
//!
//! [`Pet::pet`] never blocks. A reset or cancel reaches the engine only if its
//! thread is waiting at that instant; otherwise the signal is dropped and
//! counted in [`WatchdogStats::dropped_signals`]. Callers that must be sure a
//! cancel landed should retry until [`Pet::is_terminated`] returns `true`.
//!
//! ## Example
//!
//! ```rust
//! use heartbeat::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (expired, pet) = heartbeat::signal::channel(Duration::from_millis(20))?;
//!
//! // Stop petting and wait for the watchdog to notice.
//! let status = expired.recv_timeout(Duration::from_secs(1))?;
//! assert_eq!(status, Status::Expired);
//!
//! // Petting a terminated watchdog is a harmless no-op.
//! pet.pet(false);
//! pet.pet(true);
//! # Ok(())
//! # }
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod abort;
pub mod config;
pub mod engine;
pub mod error;
pub mod monitor;
pub mod pet;
pub mod signal;
pub mod stats;
pub mod status;

pub mod prelude;

pub use abort::Recovery;
pub use config::{RepeatPolicy, WatchdogConfig, WatchdogConfigBuilder};
pub use engine::{ExitHook, UnwindPayload};
pub use error::{DEFAULT_EXPIRED_MESSAGE, HeartbeatExpired, WatchdogError, WatchdogResult};
pub use pet::Pet;
pub use stats::WatchdogStats;
pub use status::{Status, WatchdogState};
