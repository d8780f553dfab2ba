//! Construction and wiring of the watch engine
//!
//! Setup is synchronous: the root tree is registered before any task is
//! spawned, and any failure returns an error with nothing left running.
//! Afterwards two tasks run on the caller's tokio runtime, the coalescing
//! filter and the error relay.
//!
//! There is no stop operation. The tasks end when the event source's
//! streams close or when the consumer drops the batch receiver.

use crate::config::WatcherConfig;
use crate::events::Batch;
use crate::filter::{relay_errors, CoalescingFilter};
use crate::ignore::IgnoreSet;
use crate::logger::WatchLogger;
use crate::registrar::register_tree;
use crate::source::{EventSource, NotifySource, SourceStreams};
use fswatch_core::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::info;

/// Output side of a running watch
#[derive(Debug)]
pub struct WatchStreams {
    /// One sorted batch per closed coalescing window
    pub events: mpsc::Receiver<Batch>,
    /// Source errors and failed registrations, unclassified
    pub errors: mpsc::Receiver<Error>,
}

/// Recursive, filtered, coalescing watcher over an [`EventSource`]
pub struct Watcher<S> {
    ignore: IgnoreSet,
    interval: Duration,
    output_capacity: usize,
    logger: Arc<dyn WatchLogger>,
    source: S,
}

impl Watcher<NotifySource> {
    /// Watch `config.root` with the platform notification backend
    pub fn start(config: WatcherConfig) -> Result<WatchStreams> {
        ensure_runtime()?;
        let (source, streams) = NotifySource::new(config.source_queue_capacity)?;
        Self::start_with_source(config, source, streams)
    }
}

impl<S: EventSource> Watcher<S> {
    /// Watch `config.root` with a caller-supplied event source
    pub fn start_with_source(
        config: WatcherConfig,
        source: S,
        streams: SourceStreams,
    ) -> Result<WatchStreams> {
        ensure_runtime()?;
        let watcher = Self::new(config, source)?;
        Ok(watcher.spawn(streams))
    }

    /// Validate the config and register the root tree
    fn new(config: WatcherConfig, mut source: S) -> Result<Self> {
        if config.output_capacity == 0 {
            return Err(Error::invalid_input(
                "output capacity must be greater than 0",
            ));
        }

        let metadata =
            std::fs::metadata(&config.root).map_err(|e| Error::walk(&config.root, e))?;
        if !metadata.is_dir() {
            return Err(Error::invalid_input(format!(
                "{} is not a directory",
                config.root.display()
            )));
        }

        let ignore = IgnoreSet::new(&config.root, &config.ignore);
        let registered =
            register_tree(&mut source, &ignore, &config.root, config.logger.as_ref())?;

        info!(
            "Watching {} ({} directories, {} ignored, interval {:?})",
            config.root.display(),
            registered,
            ignore.len(),
            config.interval
        );

        Ok(Self {
            ignore,
            interval: config.interval,
            output_capacity: config.output_capacity,
            logger: config.logger,
            source,
        })
    }

    /// Spawn the filter and relay tasks
    fn spawn(self, streams: SourceStreams) -> WatchStreams {
        let (batch_tx, batch_rx) = mpsc::channel(self.output_capacity);
        let (error_tx, error_rx) = mpsc::channel(self.output_capacity);

        tokio::spawn(relay_errors(streams.errors, error_tx.clone()));

        let filter = CoalescingFilter::new(
            self.source,
            streams.events,
            self.ignore,
            self.interval,
            self.logger,
            batch_tx,
            error_tx,
        );
        tokio::spawn(filter.run());

        WatchStreams {
            events: batch_rx,
            errors: error_rx,
        }
    }
}

/// Watch `root` recursively, coalescing changes over `interval`
///
/// `ignore` names are relative to `root`. Must be called from within a
/// tokio runtime.
pub fn watch<I, N>(root: impl Into<PathBuf>, interval: Duration, ignore: I) -> Result<WatchStreams>
where
    I: IntoIterator<Item = N>,
    N: AsRef<Path>,
{
    let config = WatcherConfig::builder(root)
        .interval(interval)
        .ignore_all(ignore)
        .build();
    Watcher::start(config)
}

fn ensure_runtime() -> Result<()> {
    Handle::try_current()
        .map(|_| ())
        .map_err(|e| Error::watcher(format!("Watching requires a tokio runtime: {e}")))
}
