//! Output formatting module
//!
//! Every formatter receives the final table row by row, in grid order, and
//! the run counters once at the end.

use anyhow::Result;
use gridsent_core::AggregateRow;
use gridsent_engine::{RunReport, WorkerStats};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format one cell's totals
    fn format_row(&mut self, cell: &str, row: &AggregateRow) -> Result<()>;

    /// Finalize output (e.g., footer, closing the JSON document)
    fn finish(&mut self, stats: &WorkerStats) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Column headers shared by the tabular formats
pub const HEADERS: [&str; 3] = ["Cell", "#Total Tweets", "#Overall Sentiment Score"];

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Text,
    /// JSON document with rows and run statistics
    Json,
    /// Markdown table with a totals footer
    Markdown,
}

impl OutputFormat {
    /// Every format with a one-line description
    pub fn describe_all() -> [(&'static str, &'static str); 3] {
        [
            ("text", "Aligned plain-text table (default)"),
            ("json", "JSON document with rows and run statistics"),
            ("markdown", "Markdown table with a totals footer"),
        ]
    }
}

/// Build the formatter for `format` over `writer`
pub fn create_formatter<W>(format: OutputFormat, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// Feed a whole report through a formatter
pub fn write_report(formatter: &mut dyn OutputFormatter, report: &RunReport) -> Result<()> {
    for (cell, row) in report.aggregate.iter() {
        formatter.format_row(cell, row)?;
    }
    formatter.finish(&report.stats)
}
