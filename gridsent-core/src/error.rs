//! Core error types
//!
//! Only load-time failures surface here. Per-record problems (a line that
//! does not decode, a point outside every cell) are not errors at this layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building the shared lexicon and grid
#[derive(Debug, Error)]
pub enum CoreError {
    /// A lexicon line could not be parsed
    #[error("lexicon line {line}: {reason}")]
    LexiconParse {
        /// 1-based line number in the lexicon source
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The grid definition is not a valid feature collection
    #[error("grid definition: {0}")]
    GridParse(String),

    /// The grid definition contains no cells
    #[error("grid definition contains no cells")]
    EmptyGrid,

    /// Two cells share the same id
    #[error("duplicate cell id '{0}'")]
    DuplicateCell(String),

    /// A cell has a lower bound above its upper bound
    #[error("cell '{id}' has inverted bounds")]
    InvalidCellBounds {
        /// The offending cell id
        id: String,
    },

    /// A source file could not be read
    #[error("cannot read {path:?}: {source}")]
    Io {
        /// The file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
