//! Grid of named rectangular cells and point resolution
//!
//! Cells are half-open rectangles `(xmin, xmax] x (ymin, ymax]`: exclusive on
//! the left and bottom edges, inclusive on the right and top. A point sitting
//! on an edge shared by two adjacent cells therefore belongs to exactly one of
//! them, the one whose upper bound equals the point.

use crate::error::{CoreError, Result};
use crate::record::Point;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// A named axis-aligned cell
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Cell label, e.g. `A1`
    pub id: String,
    /// Exclusive lower x bound
    pub xmin: f64,
    /// Inclusive upper x bound
    pub xmax: f64,
    /// Exclusive lower y bound
    pub ymin: f64,
    /// Inclusive upper y bound
    pub ymax: f64,
}

impl GridCell {
    /// Create a cell
    pub fn new(id: impl Into<String>, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Self {
        Self {
            id: id.into(),
            xmin,
            xmax,
            ymin,
            ymax,
        }
    }

    /// Half-open containment test
    pub fn contains(&self, point: Point) -> bool {
        self.xmin < point.x && point.x <= self.xmax && self.ymin < point.y && point.y <= self.ymax
    }

    /// Whether two cells claim at least one common point
    pub fn overlaps(&self, other: &GridCell) -> bool {
        self.xmin.max(other.xmin) < self.xmax.min(other.xmax)
            && self.ymin.max(other.ymin) < self.ymax.min(other.ymax)
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: CellProperties,
}

#[derive(Debug, Deserialize)]
struct CellProperties {
    id: String,
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl From<CellProperties> for GridCell {
    fn from(p: CellProperties) -> Self {
        GridCell::new(p.id, p.xmin, p.xmax, p.ymin, p.ymax)
    }
}

/// Immutable, ordered set of cells
///
/// Enumeration order is the order of the source definition. It decides which
/// cell wins if malformed data ever makes cells overlap, and it fixes the row
/// order of the final table.
#[derive(Debug, Clone, PartialEq)]
pub struct GridIndex {
    cells: Vec<GridCell>,
}

impl GridIndex {
    /// Build an index, rejecting empty grids, duplicate ids and inverted bounds
    pub fn new(cells: Vec<GridCell>) -> Result<Self> {
        if cells.is_empty() {
            return Err(CoreError::EmptyGrid);
        }

        let mut seen = HashSet::with_capacity(cells.len());
        for cell in &cells {
            // `!(a <= b)` also rejects NaN bounds
            if !(cell.xmin <= cell.xmax) || !(cell.ymin <= cell.ymax) {
                return Err(CoreError::InvalidCellBounds {
                    id: cell.id.clone(),
                });
            }
            if !seen.insert(cell.id.as_str()) {
                return Err(CoreError::DuplicateCell(cell.id.clone()));
            }
        }

        Ok(Self { cells })
    }

    /// Parse a feature collection whose features carry
    /// `properties: { id, xmin, xmax, ymin, ymax }`
    pub fn from_geojson(source: &str) -> Result<Self> {
        let collection: FeatureCollection =
            serde_json::from_str(source).map_err(|e| CoreError::GridParse(e.to_string()))?;

        Self::new(
            collection
                .features
                .into_iter()
                .map(|feature| feature.properties.into())
                .collect(),
        )
    }

    /// Load and parse a grid definition file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_geojson(&source)
    }

    /// First cell, in enumeration order, that contains the point
    pub fn resolve(&self, point: Point) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.contains(point))
    }

    /// Cells in enumeration order
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Cell ids in enumeration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.id.as_str())
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed index
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Pairs of cell ids whose rectangles overlap
    ///
    /// A well-formed grid returns nothing here. Overlaps are not rejected at
    /// load time; `resolve` stays deterministic by taking the first match.
    pub fn overlapping_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.cells.iter().enumerate() {
            for b in &self.cells[i + 1..] {
                if a.overlaps(b) {
                    pairs.push((a.id.as_str(), b.id.as_str()));
                }
            }
        }
        pairs
    }
}
