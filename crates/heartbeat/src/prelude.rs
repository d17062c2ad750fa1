//! Prelude for heartbeat.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use heartbeat::prelude::*;
//! use std::time::Duration;
//!
//! # fn main() -> WatchdogResult<()> {
//! let config = WatchdogConfig::builder()
//!     .interval(Duration::from_secs(30))
//!     .name("ingest-loop")
//!     .build()?;
//! assert_eq!(config.repeat, RepeatPolicy::Once);
//! # Ok(())
//! # }
//! ```

pub use crate::abort::Recovery;
pub use crate::config::{RepeatPolicy, WatchdogConfig, WatchdogConfigBuilder};
pub use crate::error::{HeartbeatExpired, WatchdogError, WatchdogResult};
pub use crate::pet::Pet;
pub use crate::stats::WatchdogStats;
pub use crate::status::{Status, WatchdogState};
