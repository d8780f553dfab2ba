#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! Recursive, filtered, coalescing file system watching
//!
//! This crate layers three things over a single-directory change
//! notifier:
//! - Recursive registration of a whole tree, including directories
//!   created while watching
//! - An ignore list of root-relative names whose subtrees are never watched
//! - Time-windowed coalescing into sorted, deduplicated batches
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut streams = fswatch_watcher::watch(".", Duration::from_millis(500), [".git", "target"])?;
//!
//! while let Some(batch) = streams.events.recv().await {
//!     println!("{batch}");
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod events;
mod filter;
mod ignore;
mod logger;
mod registrar;
mod source;
mod watcher;

// Public exports - minimal API surface
pub use config::{WatcherConfig, WatcherConfigBuilder};
pub use events::{Batch, Op, RawEvent};
pub use ignore::IgnoreSet;
pub use logger::{DiscardReason, NoopLogger, TracingLogger, WatchLogger};
pub use registrar::register_tree;
pub use source::{EventSource, NotifySource, SourceStreams};
pub use watcher::{watch, WatchStreams, Watcher};
