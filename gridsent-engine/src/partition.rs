//! Line-aligned byte-range partitioning
//!
//! The stream of length `L` is first cut into `W` nearly equal shares at
//! `floor(k * L / W)`. Every interior cut is then moved forward to just past
//! the next `\n` at or after it, so each worker starts on a whole record and
//! a record straddling a nominal cut belongs to the worker on its left.
//! Cut positions are a pure function of the stream contents, so a worker can
//! derive its own range by seeking into a private reader and still agree with
//! its neighbours.

use crate::error::{EngineError, Result};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

/// Half-open byte range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteRange {
    /// First byte of the range
    pub start: u64,
    /// One past the last byte
    pub end: u64,
}

impl ByteRange {
    /// Create a range; an inverted range collapses to empty at `start`
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length in bytes
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the range holds no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits a stream of known length between a fixed group of workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePartitioner {
    total_len: u64,
    workers: usize,
}

impl RangePartitioner {
    /// Create a partitioner for `workers` workers over `total_len` bytes
    pub fn new(total_len: u64, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(EngineError::InvalidWorkerCount(workers));
        }
        Ok(Self { total_len, workers })
    }

    /// Stream length
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Worker group size
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Unaligned cut `k`, for `0 <= k <= W`
    pub fn nominal_boundary(&self, k: usize) -> u64 {
        let k = k.min(self.workers) as u128;
        (k * u128::from(self.total_len) / self.workers as u128) as u64
    }

    /// Cut `k` moved forward to the next line start
    pub fn aligned_boundary<R: Read + Seek>(&self, k: usize, reader: &mut R) -> Result<u64> {
        if k == 0 {
            return Ok(0);
        }
        if k >= self.workers {
            return Ok(self.total_len);
        }

        let nominal = self.nominal_boundary(k);
        if nominal >= self.total_len {
            return Ok(self.total_len);
        }
        next_line_start(reader, nominal, self.total_len)
    }

    /// Range of a single worker, found by seeking into `reader`
    pub fn range_for<R: Read + Seek>(&self, worker: usize, reader: &mut R) -> Result<ByteRange> {
        if worker >= self.workers {
            return Err(EngineError::UnknownWorker {
                worker,
                workers: self.workers,
            });
        }

        let start = self.aligned_boundary(worker, reader)?;
        let end = self.aligned_boundary(worker + 1, reader)?;
        Ok(ByteRange::new(start, end))
    }

    /// Ranges of every worker, in worker order
    pub fn ranges<R: Read + Seek>(&self, reader: &mut R) -> Result<Vec<ByteRange>> {
        let cuts = (0..=self.workers)
            .map(|k| self.aligned_boundary(k, reader))
            .collect::<Result<Vec<_>>>()?;

        Ok(cuts
            .windows(2)
            .map(|pair| ByteRange::new(pair[0], pair[1]))
            .collect())
    }
}

/// Offset just past the first `\n` in `[offset, limit)`, or `limit` if none
pub fn next_line_start<R: Read + Seek>(reader: &mut R, offset: u64, limit: u64) -> Result<u64> {
    if offset >= limit {
        return Ok(limit);
    }

    reader.seek(SeekFrom::Start(offset))?;
    let mut scan = BufReader::new(reader.by_ref().take(limit - offset));
    let mut position = offset;

    loop {
        let buf = scan.fill_buf()?;
        if buf.is_empty() {
            return Ok(limit);
        }
        if let Some(i) = buf.iter().position(|&b| b == b'\n') {
            return Ok(position + i as u64 + 1);
        }
        let consumed = buf.len();
        position += consumed as u64;
        scan.consume(consumed);
    }
}
