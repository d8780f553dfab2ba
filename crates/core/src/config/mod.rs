//! Configuration module for fswatch
//!
//! Settings can be loaded from TOML files and/or environment variables.
//! Command-line flags are applied on top by the driver.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.fswatch/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".fswatch").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Watch engine settings
    #[serde(default)]
    pub watch: WatchSettings,
}

/// Settings for a single recursive watch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Coalescing window in milliseconds
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Names, relative to the watched root, that are never watched or reported
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Capacity of the queue between the notification backend and the filter
    #[serde(default = "default_source_queue_capacity")]
    pub source_queue_capacity: usize,

    /// Capacity of the batch and error output channels
    #[serde(default = "default_output_capacity")]
    pub output_capacity: usize,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            ignore: Vec::new(),
            source_queue_capacity: default_source_queue_capacity(),
            output_capacity: default_output_capacity(),
        }
    }
}

impl WatchSettings {
    /// Get the coalescing interval
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let watch = &self.watch;

        if watch.source_queue_capacity == 0 {
            return Err(Error::config(
                "watch.source_queue_capacity must be greater than 0".to_string(),
            ));
        }

        if watch.output_capacity == 0 {
            return Err(Error::config(
                "watch.output_capacity must be greater than 0".to_string(),
            ));
        }

        for name in &watch.ignore {
            validate_ignore_name(name)?;
        }

        Ok(())
    }
}

/// Ignore names are joined onto the root, so they must stay beneath it
fn validate_ignore_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::config("Ignore entries must not be empty".to_string()));
    }

    let path = Path::new(name);
    if path.is_absolute() {
        return Err(Error::config(format!(
            "Ignore entry '{name}' must be relative to the watched root"
        )));
    }

    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(Error::config(format!(
            "Ignore entry '{name}' must not leave the watched root"
        )));
    }

    Ok(())
}
