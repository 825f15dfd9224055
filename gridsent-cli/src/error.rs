//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures, reported through `anyhow`
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Configuration error
    ConfigError(String),
    /// Lexicon or grid failed validation
    ValidationFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ValidationFailed(msg) => write!(f, "Validation failed: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

/// Fail with [`CliError::FileNotFound`] unless `path` is an existing file
pub fn require_file(path: &std::path::Path) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::FileNotFound(path.display().to_string()).into())
    }
}
