//! gridsent CLI library
//!
//! This library provides the command-line interface for aggregating
//! sentiment scores of geotagged records over a grid of cells.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
