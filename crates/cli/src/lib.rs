//! Library interface for the fswatch CLI
//!
//! Exposes the pieces of the driver that are worth testing on their own
//! while keeping the binary logic in main.rs.

pub mod output;

pub use anyhow::Result;
pub use fswatch_core::config::{Config, WatchSettings};

use std::time::Duration;

/// Apply command-line overrides on top of loaded settings
///
/// An explicit interval replaces the configured one; ignore names are
/// appended to the configured list.
pub fn apply_overrides(
    settings: &mut WatchSettings,
    interval: Option<Duration>,
    ignore: &[String],
) {
    if let Some(interval) = interval {
        settings.interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
    }
    for name in ignore {
        if !settings.ignore.contains(name) {
            settings.ignore.push(name.clone());
        }
    }
}
