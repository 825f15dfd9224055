//! Lexicon scoring and grid aggregation primitives
//!
//! This crate holds the deterministic half of the gridded sentiment pipeline:
//! the phrase lexicon, the grid of named cells, the MaxMatch scorer and the
//! per-cell aggregate. Nothing here touches threads or the input stream; the
//! partitioning and execution layers live in `gridsent-engine`.
//!
//! The aggregate is a monoid. Partial tables built over any split of the
//! input combine into the same global table regardless of grouping or order,
//! which is what lets the engine process disjoint byte ranges in parallel.
//!
//! # Example
//!
//! ```rust
//! use gridsent_core::{Aggregator, GridCell, GridIndex, Lexicon, Monoid, Point, SentimentMatcher};
//!
//! let lexicon = Lexicon::from_entries([("good", 3), ("not good", -2)]);
//! let grid = GridIndex::new(vec![GridCell::new("A1", 0.0, 10.0, 0.0, 10.0)]).unwrap();
//! let matcher = SentimentMatcher::new(&lexicon);
//!
//! let mut table = Aggregator::for_grid(&grid);
//! let cell = grid.resolve(Point::new(5.0, 5.0)).unwrap();
//! table.record(&cell.id, matcher.score("this is not good!"));
//!
//! let merged = table.combine(&Aggregator::for_grid(&grid));
//! assert_eq!(merged.get("A1").unwrap().total_score, -2);
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod error;
pub mod format;
pub mod grid;
pub mod lexicon;
pub mod matcher;
pub mod monoid;
pub mod record;

pub use aggregate::{AggregateRow, Aggregator};
pub use error::{CoreError, Result};
pub use format::format_score;
pub use grid::{GridCell, GridIndex};
pub use lexicon::Lexicon;
pub use matcher::SentimentMatcher;
pub use monoid::{Monoid, MonoidReduce};
pub use record::{Point, Record};
