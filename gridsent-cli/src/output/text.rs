//! Plain text output formatter

use super::{OutputFormatter, HEADERS};
use anyhow::Result;
use gridsent_core::{format_score, AggregateRow};
use gridsent_engine::WorkerStats;
use std::io::Write;

/// Aligned table, header first
pub struct TextFormatter<W: Write> {
    writer: W,
    header_written: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            writeln!(
                self.writer,
                "{:<8}{:>16}{:>28}",
                HEADERS[0], HEADERS[1], HEADERS[2]
            )?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_row(&mut self, cell: &str, row: &AggregateRow) -> Result<()> {
        self.write_header()?;
        writeln!(
            self.writer,
            "{:<8}{:>16}{:>28}",
            cell,
            row.total_count,
            format_score(row.total_score)
        )?;
        Ok(())
    }

    fn finish(&mut self, _stats: &WorkerStats) -> Result<()> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
