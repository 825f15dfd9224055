//! Process command implementation

use crate::config::CliConfig;
use crate::error::require_file;
use crate::output::{self, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use gridsent_engine::{Coordinator, EngineConfig, ExecutionMode, Input, RunReport};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Record stream (one JSON record per line)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Lexicon file (`phrase tokens... score` per line)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub lexicon: PathBuf,

    /// Grid definition (GeoJSON feature collection)
    #[arg(short, long, value_name = "FILE", required = true)]
    pub grid: PathBuf,

    /// Number of workers the input is split between (default: one per core)
    #[arg(short, long, value_name = "N", env = "GRIDSENT_WORKERS")]
    pub workers: Option<usize>,

    /// Thread pool size for parallel execution (default: one per core)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Run workers one after another on the main thread
    #[arg(short, long)]
    pub sequential: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self) -> Result<()> {
        // Initialize logging based on verbosity
        self.init_logging();

        log::debug!("Arguments: {:?}", self);

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let engine_config = self.engine_config(&config)?;

        require_file(&self.input)?;
        require_file(&self.lexicon)?;
        require_file(&self.grid)?;

        let mut coordinator = Coordinator::new(engine_config)?;
        coordinator
            .load_shared_state(&self.lexicon, &self.grid)
            .context("Failed to load lexicon and grid")?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_workers(coordinator.config().workers as u64);
        let report = coordinator
            .run_with_progress(&Input::from_file(&self.input), &|output| {
                progress.worker_completed(output)
            })
            .with_context(|| format!("Failed to process {}", self.input.display()))?;
        progress.finish();

        log_summary(&report);

        let format = self.format.unwrap_or(config.output.format);
        self.write_output(&report, format, config.output.pretty_json)
    }

    /// Merge file settings and flags into an engine configuration
    pub fn engine_config(&self, config: &CliConfig) -> Result<EngineConfig> {
        let processing = &config.processing;
        let mode = if self.sequential {
            ExecutionMode::Sequential
        } else {
            processing.mode
        };

        let engine_config = EngineConfig::builder()
            .workers(self.workers.unwrap_or_else(|| processing.resolved_workers()))
            .threads(self.threads.or_else(|| processing.resolved_threads()))
            .execution_mode(mode)
            .layout(config.layout.clone())
            .build()?;
        Ok(engine_config)
    }

    fn write_output(&self, report: &RunReport, format: OutputFormat, pretty: bool) -> Result<()> {
        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };

        let mut formatter = output::create_formatter(format, writer, pretty);
        output::write_report(formatter.as_mut(), report)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}

fn log_summary(report: &RunReport) {
    let stats = &report.stats;
    log::info!(
        "{} workers ({}) finished in {:.2?}",
        report.workers.len(),
        report.mode.as_str(),
        report.elapsed
    );
    log::info!(
        "{} lines, {} records, {} skipped, {} outside the grid",
        stats.lines,
        stats.records,
        stats.skipped,
        stats.unlocated
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProcessArgs {
        ProcessArgs {
            input: PathBuf::from("stream.json"),
            lexicon: PathBuf::from("lexicon.txt"),
            grid: PathBuf::from("grid.json"),
            workers: None,
            threads: None,
            sequential: false,
            format: None,
            output: None,
            config: None,
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_flags_override_file() {
        let config = CliConfig::parse("[processing]\nworkers = 3\nthreads = 2\n").unwrap();

        let from_file = args().engine_config(&config).unwrap();
        assert_eq!(from_file.workers, 3);
        assert_eq!(from_file.threads, Some(2));
        assert_eq!(from_file.execution_mode, ExecutionMode::Parallel);

        let mut overridden = args();
        overridden.workers = Some(9);
        overridden.sequential = true;
        let engine_config = overridden.engine_config(&config).unwrap();
        assert_eq!(engine_config.workers, 9);
        assert_eq!(engine_config.execution_mode, ExecutionMode::Sequential);
    }

    #[test]
    fn test_zero_workers_flag_rejected() {
        let mut zero = args();
        zero.workers = Some(0);
        assert!(zero.engine_config(&CliConfig::default()).is_err());
    }

    #[test]
    fn test_missing_input_reported() {
        let err = args().execute().unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
