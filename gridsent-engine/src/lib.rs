//! Partitioned ingestion and reduction for gridded sentiment aggregation
//!
//! This crate splits a record stream into line-aligned byte ranges, runs one
//! worker per range, and reduces the workers' per-cell tables into a single
//! result. Workers share nothing but the read-only lexicon and grid.
//!
//! ```no_run
//! use gridsent_engine::{Coordinator, EngineConfig, Input};
//! use std::path::Path;
//!
//! # fn main() -> gridsent_engine::Result<()> {
//! let mut coordinator = Coordinator::new(EngineConfig::builder().workers(4).build()?)?;
//! coordinator.load_shared_state(Path::new("lexicon.txt"), Path::new("grid.json"))?;
//! let report = coordinator.run(&Input::from_file("stream.json"))?;
//!
//! for (cell, row) in report.aggregate.iter() {
//!     println!("{cell}: {} records, score {}", row.total_count, row.total_score);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod coordinator;
pub mod decoder;
pub mod error;
pub mod executor;
pub mod input;
pub mod partition;
pub mod worker;

// Re-export key types
pub use config::{EngineConfig, EngineConfigBuilder};
pub use coordinator::{Coordinator, Phase, RunReport, WorkerSummary};
pub use decoder::{RecordDecoder, RecordLayout};
pub use error::{EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use input::Input;
pub use partition::{ByteRange, RangePartitioner};
pub use worker::{Partial, SharedState, Worker, WorkerOutput, WorkerStats};

// Re-export from core for convenience
pub use gridsent_core::{AggregateRow, Aggregator, GridIndex, Lexicon};
