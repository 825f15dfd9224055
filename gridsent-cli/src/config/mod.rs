//! Configuration module
//!
//! Optional TOML file read by `process --config`. Every field has a default,
//! so a file only needs the settings it changes; command-line flags win over
//! the file.

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use anyhow::Context;
use gridsent_engine::{ExecutionMode, RecordLayout};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Record layout
    #[serde(default)]
    pub layout: RecordLayout,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Processing-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Worker group size (0 = one per core)
    pub workers: usize,

    /// Sequential or parallel execution
    pub mode: ExecutionMode,

    /// Thread pool size (0 = auto)
    pub threads: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            mode: ExecutionMode::Parallel,
            threads: 0,
        }
    }
}

impl ProcessingConfig {
    /// Worker count with `0` resolved to the number of cores
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    /// Thread count with `0` mapped to auto
    pub fn resolved_threads(&self) -> Option<usize> {
        (self.threads > 0).then_some(self.threads)
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

impl CliConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&source)
    }

    /// Parse TOML text
    pub fn parse(source: &str) -> CliResult<Self> {
        toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

/// Commented template written by `generate-config`
pub const TEMPLATE: &str = r#"# gridsent configuration
#
# Every setting is optional; command-line flags override these values.

[processing]
# Number of byte ranges the input is split into (0 = one per core)
workers = 0

# "parallel" runs workers on a thread pool, "sequential" one after another
mode = "parallel"

# Thread pool size for parallel mode (0 = one per core)
threads = 0

[layout]
# JSON pointers to the [x, y] coordinate array, tried in order
point_pointers = ["/value/geometry/coordinates", "/doc/coordinates/coordinates"]

# JSON pointers to the record text, tried in order
text_pointers = ["/value/properties/text", "/doc/text"]

[output]
# "text", "json" or "markdown"
format = "text"

# Indent JSON output
pretty_json = true
"#;
