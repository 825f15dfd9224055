//! Markdown output formatter

use super::{OutputFormatter, HEADERS};
use anyhow::Result;
use gridsent_core::{format_score, AggregateRow, Monoid};
use gridsent_engine::WorkerStats;
use std::io::Write;

/// Markdown table with a bold totals row
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    header_written: bool,
    totals: AggregateRow,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new Markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            totals: AggregateRow::default(),
        }
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "| {} | {} | {} |", HEADERS[0], HEADERS[1], HEADERS[2])?;
            writeln!(self.writer, "|---|---:|---:|")?;
            self.header_written = true;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_row(&mut self, cell: &str, row: &AggregateRow) -> Result<()> {
        self.write_header()?;
        self.totals = self.totals.combine(row);
        writeln!(
            self.writer,
            "| {} | {} | {} |",
            cell,
            row.total_count,
            format_score(row.total_score)
        )?;
        Ok(())
    }

    fn finish(&mut self, stats: &WorkerStats) -> Result<()> {
        self.write_header()?;
        writeln!(
            self.writer,
            "| **Total** | **{}** | **{}** |",
            self.totals.total_count,
            format_score(self.totals.total_score)
        )?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "*{} records, {} outside the grid, {} lines skipped*",
            stats.records, stats.unlocated, stats.skipped
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_footer() {
        let mut out = Vec::new();
        {
            let mut formatter = MarkdownFormatter::new(&mut out);
            formatter.format_row("A1", &AggregateRow::new(2, 5)).unwrap();
            formatter.format_row("A2", &AggregateRow::new(1, -9)).unwrap();
            formatter.finish(&WorkerStats::default()).unwrap();
        }
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("| Cell | #Total Tweets | #Overall Sentiment Score |"));
        assert!(text.contains("| A1 | 2 | +5 |"));
        assert!(text.contains("| A2 | 1 | -9 |"));
        assert!(text.contains("| **Total** | **3** | **-4** |"));
    }
}
