//! Configuration for a single watch
//!
//! [`WatcherConfig`] is immutable once built. Use [`WatcherConfig::builder`]
//! or map loaded settings with [`WatcherConfig::from_settings`].

use crate::logger::{TracingLogger, WatchLogger};
use fswatch_core::config::WatchSettings;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Immutable configuration for the watch engine
#[derive(Clone)]
pub struct WatcherConfig {
    /// Root of the watched tree
    pub root: PathBuf,
    /// Coalescing window, fixed from the first qualifying event
    pub interval: Duration,
    /// Names relative to `root` that are never watched or reported
    pub ignore: Vec<PathBuf>,
    /// Capacity of the queue between the OS backend and the filter
    pub source_queue_capacity: usize,
    /// Capacity of the batch and error output channels
    pub output_capacity: usize,
    /// Receives the engine's registration, discard and emit decisions
    pub logger: Arc<dyn WatchLogger>,
}

impl WatcherConfig {
    /// Create configuration from builder
    pub fn builder(root: impl Into<PathBuf>) -> WatcherConfigBuilder {
        WatcherConfigBuilder::new(root.into())
    }

    /// Map loaded settings onto a watch of `root`
    pub fn from_settings(root: impl Into<PathBuf>, settings: &WatchSettings) -> Self {
        Self::builder(root)
            .interval(settings.interval())
            .ignore_all(settings.ignore.iter())
            .source_queue_capacity(settings.source_queue_capacity)
            .output_capacity(settings.output_capacity)
            .build()
    }
}

impl fmt::Debug for WatcherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatcherConfig")
            .field("root", &self.root)
            .field("interval", &self.interval)
            .field("ignore", &self.ignore)
            .field("source_queue_capacity", &self.source_queue_capacity)
            .field("output_capacity", &self.output_capacity)
            .finish_non_exhaustive()
    }
}

/// Builder for WatcherConfig
pub struct WatcherConfigBuilder {
    root: PathBuf,
    interval: Duration,
    ignore: Vec<PathBuf>,
    source_queue_capacity: usize,
    output_capacity: usize,
    logger: Option<Arc<dyn WatchLogger>>,
}

impl WatcherConfigBuilder {
    fn new(root: PathBuf) -> Self {
        let defaults = WatchSettings::default();
        Self {
            root,
            interval: defaults.interval(),
            ignore: Vec::new(),
            source_queue_capacity: defaults.source_queue_capacity,
            output_capacity: defaults.output_capacity,
            logger: None,
        }
    }

    /// Set the coalescing interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the coalescing interval in milliseconds
    pub fn interval_ms(self, ms: u64) -> Self {
        self.interval(Duration::from_millis(ms))
    }

    /// Ignore one name relative to the root
    pub fn ignore(mut self, name: impl AsRef<Path>) -> Self {
        self.ignore.push(name.as_ref().to_path_buf());
        self
    }

    /// Ignore several names relative to the root
    pub fn ignore_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        self.ignore
            .extend(names.into_iter().map(|n| n.as_ref().to_path_buf()));
        self
    }

    /// Set the raw notification queue capacity
    pub fn source_queue_capacity(mut self, capacity: usize) -> Self {
        self.source_queue_capacity = capacity;
        self
    }

    /// Set the output channel capacity
    pub fn output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    /// Inject a logger
    pub fn logger(mut self, logger: Arc<dyn WatchLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Build the configuration
    pub fn build(self) -> WatcherConfig {
        WatcherConfig {
            root: self.root,
            interval: self.interval,
            ignore: self.ignore,
            source_queue_capacity: self.source_queue_capacity,
            output_capacity: self.output_capacity,
            logger: self.logger.unwrap_or_else(|| Arc::new(TracingLogger)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_config_builder() {
        let config = WatcherConfig::builder("/r")
            .interval_ms(1000)
            .ignore("target")
            .ignore_all([".git", "node_modules"])
            .output_capacity(4)
            .build();

        assert_eq!(config.root, PathBuf::from("/r"));
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(
            config.ignore,
            vec![
                PathBuf::from("target"),
                PathBuf::from(".git"),
                PathBuf::from("node_modules"),
            ]
        );
        assert_eq!(config.output_capacity, 4);
        assert_eq!(config.source_queue_capacity, 4096);
    }

    #[test]
    fn test_from_settings() {
        let settings = WatchSettings {
            interval_ms: 20,
            ignore: vec!["sub".to_string()],
            source_queue_capacity: 32,
            output_capacity: 2,
        };

        let config = WatcherConfig::from_settings("/r", &settings);
        assert_eq!(config.interval, Duration::from_millis(20));
        assert_eq!(config.ignore, vec![PathBuf::from("sub")]);
        assert_eq!(config.source_queue_capacity, 32);
        assert_eq!(config.output_capacity, 2);
    }

    #[test]
    fn test_debug_omits_logger() {
        let config = WatcherConfig::builder("/r").build();
        let rendered = format!("{config:?}");
        assert!(rendered.contains("interval"));
        assert!(!rendered.contains("logger"));
    }
}
