//! Progress reporting module

use gridsent_engine::WorkerOutput;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One tick per finished worker, drawn on stderr
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize the bar for a worker group
    pub fn init_workers(&mut self, total_workers: u64) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total_workers);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} workers {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Record a finished worker
    pub fn worker_completed(&self, output: &WorkerOutput) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!(
                "worker {} ({} records)",
                output.worker, output.partial.stats.records
            ));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}
