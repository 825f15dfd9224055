//! The per-worker partition -> decode -> resolve -> score -> fold cycle

use crate::decoder::{RecordDecoder, RecordLayout};
use crate::error::Result;
use crate::input::Input;
use crate::partition::{ByteRange, RangePartitioner};
use gridsent_core::{Aggregator, GridIndex, Lexicon, Monoid, SentimentMatcher};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Read-only state every worker holds an identical copy of
#[derive(Debug, Clone, PartialEq)]
pub struct SharedState {
    /// Phrase weights
    pub lexicon: Lexicon,
    /// Cell definitions
    pub grid: GridIndex,
}

impl SharedState {
    /// Bundle an already-built lexicon and grid
    pub fn new(lexicon: Lexicon, grid: GridIndex) -> Self {
        Self { lexicon, grid }
    }

    /// Load both sources; either failing is fatal for the run
    pub fn load(lexicon_path: &Path, grid_path: &Path) -> Result<Self> {
        let lexicon = Lexicon::from_file(lexicon_path)?;
        let grid = GridIndex::from_file(grid_path)?;
        Ok(Self::new(lexicon, grid))
    }
}

/// Line and record counters, reduced alongside the aggregate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    /// Bytes in the worker's range
    pub bytes: u64,
    /// Lines read
    pub lines: u64,
    /// Lines decoded into records
    pub records: u64,
    /// Lines that were not records
    pub skipped: u64,
    /// Records outside every cell
    pub unlocated: u64,
}

impl Monoid for WorkerStats {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&self, other: &Self) -> Self {
        Self {
            bytes: self.bytes + other.bytes,
            lines: self.lines + other.lines,
            records: self.records + other.records,
            skipped: self.skipped + other.skipped,
            unlocated: self.unlocated + other.unlocated,
        }
    }
}

/// What a worker hands to the reduction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partial {
    /// Per-cell totals
    pub aggregate: Aggregator,
    /// Counters
    pub stats: WorkerStats,
}

impl Monoid for Partial {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&self, other: &Self) -> Self {
        Self {
            aggregate: self.aggregate.combine(&other.aggregate),
            stats: self.stats.combine(&other.stats),
        }
    }
}

/// A finished worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerOutput {
    /// Worker index within the group
    pub worker: usize,
    /// The realigned range it processed
    pub range: ByteRange,
    /// Its partial result
    pub partial: Partial,
}

/// One member of the worker group
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    partitioner: RangePartitioner,
    shared: Arc<SharedState>,
    layout: Arc<RecordLayout>,
}

impl Worker {
    /// Create worker `id` of the group described by `partitioner`
    pub fn new(
        id: usize,
        partitioner: RangePartitioner,
        shared: Arc<SharedState>,
        layout: Arc<RecordLayout>,
    ) -> Self {
        Self {
            id,
            partitioner,
            shared,
            layout,
        }
    }

    /// Worker index
    pub fn id(&self) -> usize {
        self.id
    }

    /// Find this worker's range in `input` and fold every record in it
    ///
    /// An empty range still yields a zero-initialized table covering every
    /// cell, so the reduction always receives one partial per worker.
    pub fn run(&self, input: &Input) -> Result<WorkerOutput> {
        let mut reader = input.open()?;
        let range = self.partitioner.range_for(self.id, &mut reader)?;

        let grid = &self.shared.grid;
        let matcher = SentimentMatcher::new(&self.shared.lexicon);
        let mut aggregate = Aggregator::for_grid(grid);
        let mut unlocated = 0u64;

        let mut decoder = RecordDecoder::new(reader, range, &self.layout)?;
        for record in decoder.by_ref() {
            let record = record?;
            match grid.resolve(record.point) {
                Some(cell) => {
                    aggregate.record(&cell.id, matcher.score(&record.text));
                }
                None => unlocated += 1,
            }
        }

        let decoded = decoder.stats();
        let stats = WorkerStats {
            bytes: decoded.bytes,
            lines: decoded.lines,
            records: decoded.records,
            skipped: decoded.skipped,
            unlocated,
        };

        log::debug!(
            "worker {} finished [{}, {}): {} records, {} skipped, {} unlocated",
            self.id,
            range.start,
            range.end,
            stats.records,
            stats.skipped,
            stats.unlocated
        );

        Ok(WorkerOutput {
            worker: self.id,
            range,
            partial: Partial { aggregate, stats },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridsent_core::{AggregateRow, GridCell};

    fn line(x: f64, y: f64, text: &str) -> String {
        format!(
            r#"{{"value":{{"geometry":{{"coordinates":[{x},{y}]}},"properties":{{"text":"{text}"}}}}}},"#
        )
    }

    fn shared() -> Arc<SharedState> {
        Arc::new(SharedState::new(
            Lexicon::from_entries([("good", 3), ("not good", -2)]),
            GridIndex::new(vec![
                GridCell::new("A1", 0.0, 10.0, 0.0, 10.0),
                GridCell::new("A2", 10.0, 20.0, 0.0, 10.0),
            ])
            .unwrap(),
        ))
    }

    #[test]
    fn test_single_worker_folds_everything() {
        let stream = format!(
            "{{\"rows\":[\n{}\n{}\n{}\n]}}\n",
            line(5.0, 5.0, "this is not good!"),
            line(15.0, 5.0, "good good"),
            line(50.0, 5.0, "good")
        );
        let input = Input::from(stream.as_str());
        let partitioner = RangePartitioner::new(input.len().unwrap(), 1).unwrap();
        let worker = Worker::new(0, partitioner, shared(), Arc::new(RecordLayout::default()));

        let output = worker.run(&input).unwrap();
        let aggregate = &output.partial.aggregate;

        assert_eq!(aggregate.get("A1"), Some(&AggregateRow::new(1, -2)));
        assert_eq!(aggregate.get("A2"), Some(&AggregateRow::new(1, 6)));
        assert_eq!(output.partial.stats.records, 3);
        assert_eq!(output.partial.stats.unlocated, 1);
        assert_eq!(output.partial.stats.skipped, 2);
        assert_eq!(output.range, ByteRange::new(0, stream.len() as u64));
    }

    #[test]
    fn test_empty_range_yields_zero_table() {
        let input = Input::from("");
        let partitioner = RangePartitioner::new(0, 3).unwrap();
        let worker = Worker::new(2, partitioner, shared(), Arc::new(RecordLayout::default()));

        let output = worker.run(&input).unwrap();
        assert!(output.range.is_empty());
        assert_eq!(output.partial.aggregate, Aggregator::for_grid(&shared().grid));
        assert_eq!(output.partial.stats, WorkerStats::default());
    }

    #[test]
    fn test_stats_monoid() {
        let a = WorkerStats {
            bytes: 10,
            lines: 2,
            records: 1,
            skipped: 1,
            unlocated: 0,
        };
        let b = WorkerStats {
            bytes: 5,
            lines: 1,
            records: 1,
            skipped: 0,
            unlocated: 1,
        };

        assert_eq!(a.combine(&b), b.combine(&a));
        assert_eq!(a.combine(&WorkerStats::identity()), a);
        assert_eq!(a.combine(&b).lines, 3);
    }
}
