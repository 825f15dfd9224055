//! Execution strategies for the worker group

use crate::error::Result;
use crate::input::Input;
use crate::worker::{Worker, WorkerOutput};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

// Re-export executors
#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Workers run one after another on the calling thread
    Sequential,
    /// Workers run concurrently on a thread pool
    #[default]
    Parallel,
}

impl ExecutionMode {
    /// Lower-case name used in config files and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }
}

/// Callback invoked as each worker finishes
pub type WorkerDone<'a> = &'a (dyn Fn(&WorkerOutput) + Sync);

/// Runs every worker of the group to completion
///
/// Outputs are returned in worker order. The first worker error aborts the
/// run; there is no partial-failure recovery.
pub trait Executor: Send + Sync {
    /// Run all workers over `input`
    fn run(&self, workers: &[Worker], input: &Input, on_done: WorkerDone<'_>)
        -> Result<Vec<WorkerOutput>>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Build the executor for a mode
pub fn for_mode(mode: ExecutionMode, threads: Option<usize>) -> Result<Box<dyn Executor>> {
    match mode {
        ExecutionMode::Sequential => Ok(Box::new(SequentialExecutor)),
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => Ok(Box::new(ParallelExecutor::new(threads)?)),
        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Parallel => {
            let _ = threads;
            log::warn!("built without the parallel feature, running workers sequentially");
            Ok(Box::new(SequentialExecutor))
        }
    }
}
