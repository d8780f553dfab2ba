//! Coalescing filter and error relay
//!
//! The filter is a single task that owns the seen set and the window
//! timer. It starts Idle; the first qualifying notification arms the timer
//! and switches to Collecting. Later notifications only add to the seen
//! set, the deadline is never pushed back. When the timer fires the seen
//! set becomes one sorted [`Batch`] and the filter returns to Idle.
//!
//! The seen set is bounded only by memory for the length of one window.

use crate::events::{Batch, RawEvent};
use crate::ignore::IgnoreSet;
use crate::logger::{DiscardReason, WatchLogger};
use crate::registrar::register_tree;
use crate::source::EventSource;
use fswatch_core::error::{Error, ResultExt};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant, Sleep};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Idle,
    Collecting,
}

/// The batch receiver is gone, nothing can observe further output
struct OutputClosed;

pub(crate) struct CoalescingFilter<S> {
    source: S,
    events: mpsc::Receiver<RawEvent>,
    ignore: IgnoreSet,
    interval: Duration,
    logger: Arc<dyn WatchLogger>,
    seen: HashSet<PathBuf>,
    window: Window,
    timer: Pin<Box<Sleep>>,
    batch_tx: mpsc::Sender<Batch>,
    error_tx: mpsc::Sender<Error>,
}

impl<S: EventSource> CoalescingFilter<S> {
    pub(crate) fn new(
        source: S,
        events: mpsc::Receiver<RawEvent>,
        ignore: IgnoreSet,
        interval: Duration,
        logger: Arc<dyn WatchLogger>,
        batch_tx: mpsc::Sender<Batch>,
        error_tx: mpsc::Sender<Error>,
    ) -> Self {
        Self {
            source,
            events,
            ignore,
            interval,
            logger,
            seen: HashSet::new(),
            window: Window::Idle,
            timer: Box::pin(sleep(Duration::ZERO)),
            batch_tx,
            error_tx,
        }
    }

    /// Run until the event source closes or the batch consumer goes away
    pub(crate) async fn run(mut self) {
        loop {
            let collecting = self.window == Window::Collecting;
            tokio::select! {
                maybe_event = self.events.recv() => {
                    let Some(event) = maybe_event else {
                        debug!("Event source closed, filter stopping");
                        break;
                    };
                    self.on_event(event).await;
                }
                () = &mut self.timer, if collecting => {
                    if self.flush().await.is_err() {
                        break;
                    }
                }
            }
        }
        debug!("Coalescing filter stopped");
    }

    async fn on_event(&mut self, event: RawEvent) {
        trace!("Received raw event: {:?}", event);

        if event.op.is_attribute_only() {
            self.logger
                .event_discarded(&event.path, DiscardReason::AttributeOnly);
            return;
        }
        if self.ignore.contains(&event.path) {
            self.logger.event_discarded(&event.path, DiscardReason::Ignored);
            return;
        }

        if self.window == Window::Idle {
            self.timer.as_mut().reset(Instant::now() + self.interval);
            self.window = Window::Collecting;
        }

        // Register before reading further notifications so files created
        // inside a new directory are not missed
        if event.is_create() && is_dir(&event.path) {
            let registered = register_tree(
                &mut self.source,
                &self.ignore,
                &event.path,
                self.logger.as_ref(),
            )
            .context(format!("Registering new directory {}", event.path.display()));
            if let Err(e) = registered {
                warn!("Failed to register new directory {:?}: {}", event.path, e);
                report(&self.error_tx, e).await;
            }
        }

        self.seen.insert(event.path);
    }

    async fn flush(&mut self) -> Result<(), OutputClosed> {
        self.window = Window::Idle;
        let batch = Batch::from_seen(std::mem::take(&mut self.seen));
        self.logger.batch_emitted(&batch);
        self.batch_tx.send(batch).await.map_err(|_| {
            debug!("Batch receiver dropped");
            OutputClosed
        })
    }
}

async fn report(error_tx: &mpsc::Sender<Error>, err: Error) {
    if let Err(mpsc::error::SendError(err)) = error_tx.send(err).await {
        debug!("Error receiver dropped, discarding: {}", err);
    }
}

/// Forward every source error unchanged until either side closes
pub(crate) async fn relay_errors(
    mut source_errors: mpsc::Receiver<Error>,
    error_tx: mpsc::Sender<Error>,
) {
    while let Some(err) = source_errors.recv().await {
        if error_tx.send(err).await.is_err() {
            debug!("Error receiver dropped, relay stopping");
            break;
        }
    }
    debug!("Error relay stopped");
}

fn is_dir(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_dir())
        .unwrap_or(false)
}
