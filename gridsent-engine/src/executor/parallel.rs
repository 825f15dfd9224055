//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor, WorkerDone},
    input::Input,
    worker::{Worker, WorkerOutput},
};
use rayon::prelude::*;

/// Runs workers as tasks on a dedicated rayon pool
///
/// The pool may have fewer threads than there are workers; each worker is
/// still an independent task over its own range.
#[derive(Debug)]
pub struct ParallelExecutor {
    pool: rayon::ThreadPool,
}

impl ParallelExecutor {
    /// Create an executor with `threads` threads (None = one per core)
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or_else(num_cpus::get))
            .thread_name(|i| format!("gridsent-worker-{i}"))
            .build()
            .map_err(|e| EngineError::ParallelError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Number of threads in the pool
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for ParallelExecutor {
    fn run(
        &self,
        workers: &[Worker],
        input: &Input,
        on_done: WorkerDone<'_>,
    ) -> Result<Vec<WorkerOutput>> {
        self.pool.install(|| {
            workers
                .par_iter()
                .map(|worker| {
                    let output = worker.run(input)?;
                    on_done(&output);
                    Ok(output)
                })
                .collect::<Result<Vec<_>>>()
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}
