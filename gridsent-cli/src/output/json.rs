//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use gridsent_core::AggregateRow;
use gridsent_engine::WorkerStats;
use serde::Serialize;
use std::io::Write;

/// Collects rows and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    rows: Vec<CellData>,
}

/// One cell in JSON output
#[derive(Debug, Serialize)]
pub struct CellData {
    /// Cell id
    pub cell: String,
    /// Records in the cell
    pub total_count: u64,
    /// Summed score
    pub total_score: i64,
}

#[derive(Serialize)]
struct Document<'a> {
    rows: &'a [CellData],
    stats: &'a WorkerStats,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            rows: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_row(&mut self, cell: &str, row: &AggregateRow) -> Result<()> {
        self.rows.push(CellData {
            cell: cell.to_string(),
            total_count: row.total_count,
            total_score: row.total_score,
        });
        Ok(())
    }

    fn finish(&mut self, stats: &WorkerStats) -> Result<()> {
        let document = Document {
            rows: &self.rows,
            stats,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
