//! Run orchestration
//!
//! The coordinator walks a fixed sequence of phases:
//!
//! ```text
//! Init -> LoadSharedState -> Distribute -> LocalProcess -> Reduce -> Done
//! ```
//!
//! Shared state is built once and handed to every worker behind an `Arc`.
//! Workers never talk to each other; the reduction after `LocalProcess` is
//! the only point where their results meet. `Done` is terminal.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::executor::{self, ExecutionMode};
use crate::input::Input;
use crate::partition::{ByteRange, RangePartitioner};
use crate::worker::{Partial, SharedState, Worker, WorkerOutput, WorkerStats};
use gridsent_core::{Aggregator, Monoid, MonoidReduce};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Coordinator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, nothing loaded
    Init,
    /// Lexicon and grid are loaded
    LoadSharedState,
    /// Shared state and ranges handed to the worker group
    Distribute,
    /// Workers are folding their ranges
    LocalProcess,
    /// Partial results are being merged
    Reduce,
    /// Terminal
    Done,
}

/// Per-worker line of a run report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    /// Worker index
    pub worker: usize,
    /// Range it processed
    pub range: ByteRange,
    /// Its counters
    pub stats: WorkerStats,
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Global per-cell table, in grid order
    pub aggregate: Aggregator,
    /// Global counters
    pub stats: WorkerStats,
    /// One entry per worker, in worker order
    pub workers: Vec<WorkerSummary>,
    /// Mode the workers ran in
    pub mode: ExecutionMode,
    /// Wall time from distribution to the end of the reduction
    pub elapsed: Duration,
}

/// Drives one run of the pipeline
#[derive(Debug)]
pub struct Coordinator {
    config: EngineConfig,
    phase: Phase,
    shared: Option<Arc<SharedState>>,
}

impl Coordinator {
    /// Create a coordinator in `Init`
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            phase: Phase::Init,
            shared: None,
        })
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load the lexicon and grid from disk
    pub fn load_shared_state(&mut self, lexicon: &Path, grid: &Path) -> Result<&SharedState> {
        self.expect_phase(Phase::Init)?;
        let shared = SharedState::load(lexicon, grid)?;
        log::info!(
            "loaded {} lexicon entries (longest phrase {} tokens) and {} cells",
            shared.lexicon.len(),
            shared.lexicon.max_phrase_len(),
            shared.grid.len()
        );
        Ok(self.install_shared_state(shared))
    }

    /// Use an already-built lexicon and grid
    pub fn with_shared_state(mut self, shared: SharedState) -> Result<Self> {
        self.expect_phase(Phase::Init)?;
        self.install_shared_state(shared);
        Ok(self)
    }

    fn install_shared_state(&mut self, shared: SharedState) -> &SharedState {
        for (a, b) in shared.grid.overlapping_pairs() {
            log::warn!("cells {a} and {b} overlap; points in both resolve to {a}");
        }
        self.phase = Phase::LoadSharedState;
        self.shared.insert(Arc::new(shared))
    }

    /// Run every worker over `input` and reduce their results
    pub fn run(&mut self, input: &Input) -> Result<RunReport> {
        self.run_with_progress(input, &|_| {})
    }

    /// Like [`Coordinator::run`], calling `on_done` as each worker finishes
    ///
    /// A run ends in `Done` whether it succeeds or fails; a failed run cannot
    /// be resumed.
    pub fn run_with_progress(
        &mut self,
        input: &Input,
        on_done: &(dyn Fn(&WorkerOutput) + Sync),
    ) -> Result<RunReport> {
        self.expect_phase(Phase::LoadSharedState)?;
        let shared = match &self.shared {
            Some(shared) => Arc::clone(shared),
            None => {
                return Err(EngineError::InvalidPhase {
                    expected: Phase::LoadSharedState,
                    actual: Phase::Init,
                })
            }
        };

        let result = self.distribute_and_reduce(&shared, input, on_done);
        if let Err(e) = &result {
            log::error!("run failed in phase {:?}: {e}", self.phase);
            self.enter(Phase::Done);
        }
        result
    }

    fn distribute_and_reduce(
        &mut self,
        shared: &Arc<SharedState>,
        input: &Input,
        on_done: &(dyn Fn(&WorkerOutput) + Sync),
    ) -> Result<RunReport> {
        let start = Instant::now();

        self.enter(Phase::Distribute);
        let partitioner = RangePartitioner::new(input.len()?, self.config.workers)?;
        let layout = Arc::new(self.config.layout.clone());
        let workers: Vec<Worker> = (0..partitioner.workers())
            .map(|id| Worker::new(id, partitioner, Arc::clone(shared), Arc::clone(&layout)))
            .collect();
        log::debug!(
            "{} bytes split across {} workers",
            partitioner.total_len(),
            workers.len()
        );
        if log::log_enabled!(log::Level::Debug) {
            let plan = partitioner.ranges(&mut input.open()?)?;
            for (worker, range) in plan.iter().enumerate() {
                log::debug!("worker {worker}: [{}, {})", range.start, range.end);
            }
        }

        self.enter(Phase::LocalProcess);
        let executor = executor::for_mode(self.config.execution_mode, self.config.threads)?;
        let outputs = executor.run(&workers, input, on_done)?;

        self.enter(Phase::Reduce);
        let summaries = outputs
            .iter()
            .map(|output| WorkerSummary {
                worker: output.worker,
                range: output.range,
                stats: output.partial.stats,
            })
            .collect();
        let merged = Partial::reduce(outputs.into_iter().map(|output| output.partial));

        // Every partial covers the full grid, but an input-free run still
        // needs a table with every cell in grid order
        let aggregate = Aggregator::for_grid(&shared.grid).combine(&merged.aggregate);

        self.enter(Phase::Done);
        Ok(RunReport {
            aggregate,
            stats: merged.stats,
            workers: summaries,
            mode: executor.mode(),
            elapsed: start.elapsed(),
        })
    }

    fn enter(&mut self, phase: Phase) {
        log::info!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsent_core::{AggregateRow, GridCell, GridIndex, Lexicon};

    fn shared() -> SharedState {
        SharedState::new(
            Lexicon::from_entries([("happy", 2), ("sad", -2)]),
            GridIndex::new(vec![
                GridCell::new("A1", 0.0, 1.0, 0.0, 1.0),
                GridCell::new("A2", 1.0, 2.0, 0.0, 1.0),
            ])
            .unwrap(),
        )
    }

    fn stream() -> Input {
        let body = [
            r#"{"total_rows":3,"rows":["#,
            r#"{"doc":{"coordinates":{"coordinates":[0.5,0.5]},"text":"Happy happy!"}},"#,
            r#"{"doc":{"coordinates":{"coordinates":[1.5,0.5]},"text":"so sad"}},"#,
            r#"{"doc":{"coordinates":{"coordinates":[1.0,0.5]},"text":"meh"}}]}"#,
        ]
        .join("\n");
        Input::from(body.as_str())
    }

    #[test]
    fn test_phases_advance_to_done() {
        let config = EngineConfig::builder().workers(3).build().unwrap();
        let mut coordinator = Coordinator::new(config)
            .unwrap()
            .with_shared_state(shared())
            .unwrap();
        assert_eq!(coordinator.phase(), Phase::LoadSharedState);

        let report = coordinator.run(&stream()).unwrap();
        assert_eq!(coordinator.phase(), Phase::Done);

        assert_eq!(report.aggregate.get("A1"), Some(&AggregateRow::new(2, 4)));
        assert_eq!(report.aggregate.get("A2"), Some(&AggregateRow::new(1, -2)));
        assert_eq!(report.stats.records, 3);
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(report.workers.len(), 3);
    }

    #[test]
    fn test_run_before_load_is_rejected() {
        let mut coordinator = Coordinator::new(EngineConfig::sequential()).unwrap();
        let err = coordinator.run(&stream()).unwrap_err();

        assert!(matches!(
            err,
            EngineError::InvalidPhase {
                expected: Phase::LoadSharedState,
                actual: Phase::Init
            }
        ));
    }

    #[test]
    fn test_done_is_terminal() {
        let mut coordinator = Coordinator::new(EngineConfig::sequential())
            .unwrap()
            .with_shared_state(shared())
            .unwrap();
        coordinator.run(&stream()).unwrap();

        assert!(coordinator.run(&stream()).is_err());
    }

    #[test]
    fn test_failed_run_ends_in_done() {
        let mut coordinator = Coordinator::new(EngineConfig::sequential())
            .unwrap()
            .with_shared_state(shared())
            .unwrap();

        let err = coordinator
            .run(&Input::from_file("/nonexistent/stream.json"))
            .unwrap_err();
        assert!(matches!(err, EngineError::IoError(_)));
        assert_eq!(coordinator.phase(), Phase::Done);

        assert!(matches!(
            coordinator.run(&stream()),
            Err(EngineError::InvalidPhase {
                expected: Phase::LoadSharedState,
                actual: Phase::Done
            })
        ));
    }

    #[test]
    fn test_progress_called_once_per_worker() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let config = EngineConfig::builder()
            .workers(4)
            .execution_mode(ExecutionMode::Sequential)
            .build()
            .unwrap();
        let mut coordinator = Coordinator::new(config)
            .unwrap()
            .with_shared_state(shared())
            .unwrap();

        let done = AtomicUsize::new(0);
        coordinator
            .run_with_progress(&stream(), &|_| {
                done.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        assert_eq!(done.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_empty_input_reports_every_cell() {
        let mut coordinator = Coordinator::new(EngineConfig::sequential())
            .unwrap()
            .with_shared_state(shared())
            .unwrap();
        let report = coordinator.run(&Input::from("")).unwrap();

        let ids: Vec<_> = report.aggregate.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["A1", "A2"]);
        assert_eq!(report.aggregate.totals(), AggregateRow::default());
    }
}
