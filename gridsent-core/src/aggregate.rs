//! Per-cell aggregate table and its merge
//!
//! A table is pre-populated with a zero row for every cell of the grid, so
//! cells that never receive a record still appear in the output. Merging two
//! tables adds counts and scores cell by cell; that operation is the monoid
//! the coordinator reduces worker results with.

use crate::grid::GridIndex;
use crate::monoid::Monoid;
use indexmap::IndexMap;
use serde::Serialize;

/// Running totals for one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    /// Number of records that resolved to the cell
    pub total_count: u64,
    /// Sum of the records' sentiment scores
    pub total_score: i64,
}

impl AggregateRow {
    /// Create a row
    pub fn new(total_count: u64, total_score: i64) -> Self {
        Self {
            total_count,
            total_score,
        }
    }

    fn add(&mut self, other: &AggregateRow) {
        self.total_count += other.total_count;
        self.total_score += other.total_score;
    }
}

impl Monoid for AggregateRow {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&self, other: &Self) -> Self {
        let mut sum = *self;
        sum.add(other);
        sum
    }
}

/// Ordered `cell id -> totals` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregator {
    rows: IndexMap<String, AggregateRow>,
}

impl Aggregator {
    /// Zero-initialized table with one row per grid cell, in grid order
    pub fn for_grid(grid: &GridIndex) -> Self {
        Self {
            rows: grid
                .ids()
                .map(|id| (id.to_string(), AggregateRow::default()))
                .collect(),
        }
    }

    /// Count one record with the given score against a cell
    ///
    /// Returns false, leaving the table untouched, when the id is not one of
    /// the table's cells.
    pub fn record(&mut self, cell_id: &str, score: i64) -> bool {
        match self.rows.get_mut(cell_id) {
            Some(row) => {
                row.add(&AggregateRow::new(1, score));
                true
            }
            None => false,
        }
    }

    /// Add every row of `other` into this table
    ///
    /// Rows for ids this table does not know yet are appended in `other`'s
    /// order, which only happens when merging into the empty identity.
    pub fn merge_from(&mut self, other: &Aggregator) {
        for (id, row) in &other.rows {
            self.rows.entry(id.clone()).or_default().add(row);
        }
    }

    /// Totals for a cell
    pub fn get(&self, cell_id: &str) -> Option<&AggregateRow> {
        self.rows.get(cell_id)
    }

    /// Rows in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AggregateRow)> {
        self.rows.iter().map(|(id, row)| (id.as_str(), row))
    }

    /// Sum over all cells
    pub fn totals(&self) -> AggregateRow {
        self.rows
            .values()
            .fold(AggregateRow::identity(), |total, row| total.combine(row))
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no cells (only the identity)
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Monoid for Aggregator {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge_from(other);
        merged
    }
}
