//! Configuration types for the engine

use crate::decoder::RecordLayout;
use crate::error::{EngineError, Result};
use crate::executor::ExecutionMode;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Size of the worker group (number of byte ranges)
    pub workers: usize,
    /// Execution mode selector
    pub execution_mode: ExecutionMode,
    /// Number of threads for parallel execution (None = auto)
    pub threads: Option<usize>,
    /// Where records keep their point and text
    pub layout: RecordLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            execution_mode: ExecutionMode::Parallel,
            threads: None,
            layout: RecordLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a new builder for EngineConfig
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Single worker, no thread pool
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            execution_mode: ExecutionMode::Sequential,
            ..Default::default()
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(EngineError::InvalidWorkerCount(0));
        }

        if let Some(0) = self.threads {
            return Err(EngineError::ConfigError(
                "thread count must be greater than 0".to_string(),
            ));
        }

        if self.layout.point_pointers.is_empty() || self.layout.text_pointers.is_empty() {
            return Err(EngineError::ConfigError(
                "record layout needs at least one point pointer and one text pointer".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for EngineConfig
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Set the worker count
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.config.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set the record layout
    pub fn layout(mut self, layout: RecordLayout) -> Self {
        self.config.layout = layout;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<EngineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
