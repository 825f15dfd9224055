//! Sequential execution strategy

use crate::{
    error::Result,
    executor::{ExecutionMode, Executor, WorkerDone},
    input::Input,
    worker::{Worker, WorkerOutput},
};

/// Sequential single-threaded executor
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn run(
        &self,
        workers: &[Worker],
        input: &Input,
        on_done: WorkerDone<'_>,
    ) -> Result<Vec<WorkerOutput>> {
        workers
            .iter()
            .map(|worker| {
                let output = worker.run(input)?;
                on_done(&output);
                Ok(output)
            })
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
