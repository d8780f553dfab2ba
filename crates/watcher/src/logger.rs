//! Injected logging hooks for the watch engine
//!
//! The engine reports its decisions through a [`WatchLogger`] supplied in
//! [`WatcherConfig`](crate::WatcherConfig) instead of a process-wide switch.
//! [`TracingLogger`] is the default.

use crate::events::Batch;
use std::path::Path;
use tracing::{debug, trace};

/// Why a raw notification was dropped by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// Only an attribute change was reported
    AttributeOnly,
    /// The path is in the ignore set
    Ignored,
}

/// Receives engine decisions. Every hook defaults to doing nothing.
pub trait WatchLogger: Send + Sync {
    /// A directory was registered with the event source
    fn dir_registered(&self, _dir: &Path) {}

    /// A raw notification was discarded
    fn event_discarded(&self, _path: &Path, _reason: DiscardReason) {}

    /// A batch is about to be emitted
    fn batch_emitted(&self, _batch: &Batch) {}
}

/// Forwards engine decisions to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl WatchLogger for TracingLogger {
    fn dir_registered(&self, dir: &Path) {
        debug!("Adding watch for {}", dir.display());
    }

    fn event_discarded(&self, path: &Path, reason: DiscardReason) {
        trace!("Discarding event for {:?} ({:?})", path, reason);
    }

    fn batch_emitted(&self, batch: &Batch) {
        debug!("Emitting batch of {} paths", batch.len());
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl WatchLogger for NoopLogger {}
