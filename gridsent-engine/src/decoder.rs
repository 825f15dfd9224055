//! Line-oriented record decoding
//!
//! The record stream is one JSON object per line inside a large enclosing
//! array. A worker's range contains whole lines, but not every line is a
//! record: the array header, the closing bracket and blank lines all show up,
//! and a record line carries a trailing comma (or, on the last line, the
//! closing `]}`). Anything that does not decode into a record is skipped and
//! counted.

use crate::error::Result;
use crate::partition::ByteRange;
use gridsent_core::{Point, Record};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Take};

/// Where to find the coordinate pair and the text inside a record object
///
/// Both lists hold JSON pointers tried in order; the first one that yields a
/// value of the right shape wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordLayout {
    /// Pointers to a `[x, y, ...]` number array
    pub point_pointers: Vec<String>,
    /// Pointers to a string
    pub text_pointers: Vec<String>,
}

impl Default for RecordLayout {
    fn default() -> Self {
        Self {
            point_pointers: vec![
                "/value/geometry/coordinates".to_string(),
                "/doc/coordinates/coordinates".to_string(),
            ],
            text_pointers: vec![
                "/value/properties/text".to_string(),
                "/doc/text".to_string(),
            ],
        }
    }
}

impl RecordLayout {
    /// Decode one line, or `None` if it is not a usable record
    pub fn decode_line(&self, line: &str) -> Option<Record> {
        let value = parse_framed(line)?;

        let point = self
            .point_pointers
            .iter()
            .find_map(|pointer| value.pointer(pointer).and_then(parse_point))?;
        let text = self
            .text_pointers
            .iter()
            .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))?;

        Some(Record {
            point,
            text: text.to_string(),
        })
    }
}

/// Parse a line as a JSON object, tolerating array framing around it
fn parse_framed(line: &str) -> Option<Value> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed).trim_end();
    if !trimmed.starts_with('{') {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value.is_object().then_some(value);
    }

    // Last record of the array: `{...}]}` or `{...}]`
    let unframed = trimmed
        .strip_suffix("]}")
        .or_else(|| trimmed.strip_suffix(']'))?
        .trim_end();
    let unframed = unframed.strip_suffix(',').unwrap_or(unframed);

    serde_json::from_str::<Value>(unframed)
        .ok()
        .filter(Value::is_object)
}

fn parse_point(value: &Value) -> Option<Point> {
    match value.as_array()?.as_slice() {
        [x, y, ..] => Some(Point::new(x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}

/// Line counters for one decoded range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Bytes consumed
    pub bytes: u64,
    /// Lines read
    pub lines: u64,
    /// Lines that yielded a record
    pub records: u64,
    /// Lines that did not
    pub skipped: u64,
}

/// Streams the records of one byte range
pub struct RecordDecoder<'a, R: Read> {
    lines: BufReader<Take<R>>,
    layout: &'a RecordLayout,
    line: Vec<u8>,
    stats: DecodeStats,
}

impl<'a, R: Read + Seek> RecordDecoder<'a, R> {
    /// Position `source` at the start of `range` and decode up to its end
    pub fn new(mut source: R, range: ByteRange, layout: &'a RecordLayout) -> Result<Self> {
        source.seek(SeekFrom::Start(range.start))?;
        Ok(Self {
            lines: BufReader::new(source.take(range.len())),
            layout,
            line: Vec::new(),
            stats: DecodeStats::default(),
        })
    }
}

impl<R: Read> RecordDecoder<'_, R> {
    /// Counters so far
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            self.line.clear();
            let read = self.lines.read_until(b'\n', &mut self.line)?;
            if read == 0 {
                return Ok(None);
            }
            self.stats.bytes += read as u64;
            self.stats.lines += 1;

            let decoded = std::str::from_utf8(&self.line)
                .ok()
                .and_then(|line| self.layout.decode_line(line));

            match decoded {
                Some(record) => {
                    self.stats.records += 1;
                    return Ok(Some(record));
                }
                None => {
                    self.stats.skipped += 1;
                    log::trace!("skipping undecodable line of {read} bytes");
                }
            }
        }
    }
}

impl<R: Read> Iterator for RecordDecoder<'_, R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
