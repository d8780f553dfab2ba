//! Event source abstraction and the notify-backed implementation
//!
//! An event source watches individual directories (non-recursively) and
//! reports raw change notifications and asynchronous errors on two
//! streams. Recursion, filtering and coalescing are layered on top by the
//! engine.

use crate::events::RawEvent;
use fswatch_core::error::{Error, Result};
use notify::{
    Config as NotifyConfig, Event as NotifyEvent, RecommendedWatcher, RecursiveMode,
    Watcher as NotifyWatcher,
};
use std::path::Path;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{error, info, trace};

/// Something that can watch single directories for changes
pub trait EventSource: Send + 'static {
    /// Add one directory to the watch set. Not recursive.
    fn add_dir(&mut self, dir: &Path) -> Result<()>;
}

/// Output side of an event source
#[derive(Debug)]
pub struct SourceStreams {
    /// Raw change notifications
    pub events: mpsc::Receiver<RawEvent>,
    /// Asynchronous source errors
    pub errors: mpsc::Receiver<Error>,
}

/// Event source backed by the platform's recommended notify watcher
pub struct NotifySource {
    watcher: RecommendedWatcher,
}

impl NotifySource {
    /// Create the OS watcher and the bounded queues it feeds
    ///
    /// The callback never blocks: when the queue is full the notification
    /// is dropped and logged.
    pub fn new(queue_capacity: usize) -> Result<(Self, SourceStreams)> {
        if queue_capacity == 0 {
            return Err(Error::invalid_input(
                "source queue capacity must be greater than 0",
            ));
        }

        let (event_tx, event_rx) = mpsc::channel(queue_capacity);
        let (error_tx, error_rx) = mpsc::channel(queue_capacity);

        let watcher = RecommendedWatcher::new(
            move |res: std::result::Result<NotifyEvent, notify::Error>| match res {
                Ok(event) => {
                    for raw in RawEvent::from_notify(event) {
                        match event_tx.try_send(raw) {
                            Ok(()) => {}
                            Err(TrySendError::Full(raw)) => {
                                error!("Event queue full, dropping notification for {:?}", raw.path);
                            }
                            Err(TrySendError::Closed(_)) => {
                                trace!("Event queue closed, discarding notification");
                            }
                        }
                    }
                }
                Err(e) => match error_tx.try_send(Error::source(e)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(e)) => {
                        error!("Error queue full, dropping source error: {}", e);
                    }
                    Err(TrySendError::Closed(_)) => {}
                },
            },
            NotifyConfig::default(),
        )
        .map_err(Error::source)?;

        info!("Event source initialized");

        Ok((
            Self { watcher },
            SourceStreams {
                events: event_rx,
                errors: error_rx,
            },
        ))
    }
}

impl EventSource for NotifySource {
    fn add_dir(&mut self, dir: &Path) -> Result<()> {
        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(Error::source)
    }
}
