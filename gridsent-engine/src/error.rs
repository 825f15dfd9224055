//! Layered error types
//!
//! Core load failures are wrapped unchanged; everything else is an engine
//! concern (configuration, I/O on the input stream, the thread pool).

use crate::coordinator::Phase;
use gridsent_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Lexicon or grid could not be loaded
    #[error("shared state error: {0}")]
    Core(#[from] CoreError),

    /// A partition needs at least one worker
    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    /// A worker index outside the worker group
    #[error("worker {worker} is outside a group of {workers}")]
    UnknownWorker {
        /// Requested worker index
        worker: usize,
        /// Group size
        workers: usize,
    },

    /// A coordinator step was requested out of order
    #[error("coordinator is in phase {actual:?}, expected {expected:?}")]
    InvalidPhase {
        /// Phase the step requires
        expected: Phase,
        /// Phase the coordinator is in
        actual: Phase,
    },

    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
