//! Shared types for the fswatch workspace
//!
//! This crate holds the pieces every other crate leans on:
//!
//! - **Error handling**: the unified [`Error`] type and [`Result`] alias
//! - **Configuration**: layered loading of watch settings from defaults,
//!   TOML files and `FSWATCH_*` environment variables
//!

pub mod config;
pub mod error;

pub use config::{Config, WatchSettings};
pub use error::{Error, Result, ResultExt};
