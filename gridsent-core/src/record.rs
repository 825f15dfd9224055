//! Decoded input records

/// A 2-D coordinate, `x` first (longitude in the reference data)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One geotagged message, alive only between decoding and folding
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Where the message was posted
    pub point: Point,
    /// Message body
    pub text: String,
}

impl Record {
    /// Create a record
    pub fn new(point: impl Into<Point>, text: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            text: text.into(),
        }
    }
}
