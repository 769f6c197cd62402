// ============================================================================
// batchpress-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Human-readable rendering of batch events
//
// Everything goes through the `log` macros so the same lines reach the log
// file when one is configured. When stderr is a terminal an indicatif bar
// tracks completed/total; log lines are written with the bar suspended so
// they do not tear it.

use std::sync::Mutex;

use batchpress_core::events::{Event, EventHandler};
use batchpress_core::reporting::{BatchSummary, JobOutcome};
use batchpress_core::utils::{format_duration, format_elapsed};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const PROCESSING_SYMBOL: &str = "»";
    pub const RULE_WIDTH: usize = 50;
}

/// Renders batch events for a person watching the terminal.
pub struct TerminalEventHandler {
    use_progress_bar: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalEventHandler {
    pub fn new(use_progress_bar: bool) -> Self {
        Self {
            use_progress_bar,
            bar: Mutex::new(None),
        }
    }

    /// Runs `f` with the progress bar (if any) hidden.
    fn print<F: FnOnce()>(&self, f: F) {
        let bar = self.bar.lock().ok().and_then(|guard| guard.clone());
        match bar {
            Some(bar) => bar.suspend(f),
            None => f(),
        }
    }

    fn start_bar(&self, total: usize) {
        if !self.use_progress_bar {
            return;
        }
        let style = ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>.");
        let bar = ProgressBar::new(total as u64).with_style(style);
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn advance_bar(&self, outcome: &JobOutcome) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.set_message(outcome.relative_path.display().to_string());
                bar.inc(1);
            }
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn report_outcome(outcome: &JobOutcome, completed: usize, total: usize) {
        match &outcome.failure {
            None => info!(
                "  {} {} -> {} ({})",
                style(styling::SUCCESS_SYMBOL).green(),
                outcome.relative_path.display(),
                outcome.output_path.display(),
                format_elapsed(outcome.elapsed)
            ),
            Some(failure) => error!(
                "  {} {}: {}",
                styling::ERROR_SYMBOL,
                outcome.relative_path.display(),
                failure.message
            ),
        }
        info!("Progress: {}/{} videos processed", completed, total);
    }
}

/// Writes the closing summary block.
pub fn print_summary(summary: &BatchSummary) {
    let rule = "=".repeat(styling::RULE_WIDTH);
    let seconds = summary.total_elapsed.as_secs_f64();

    info!("");
    info!("{}", rule);
    info!("{}", style("Compression Summary:").bold());
    info!("Total videos processed: {}", summary.total);
    info!("Successfully compressed: {}", style(summary.succeeded).green().bold());
    if summary.failed > 0 {
        info!("Failed to compress: {}", style(summary.failed).red().bold());
    } else {
        info!("Failed to compress: {}", summary.failed);
    }
    info!(
        "Total processing time: {:.2} seconds ({})",
        seconds,
        format_duration(seconds)
    );
    info!("{}", rule);

    if !summary.failures.is_empty() {
        info!("Failed files:");
        for failed in &summary.failures {
            info!("  {} {}", styling::ERROR_SYMBOL, failed.relative_path.display());
        }
    }
}

impl EventHandler for TerminalEventHandler {
    fn handle(&self, event: &Event) {
        match event {
            Event::StateChanged { from, to } => debug!("Batch state {:?} -> {:?}", from, to),

            Event::NothingToDo { input_dir } => {
                warn!("No video files found in {}", input_dir.display());
            }

            Event::BatchStarted {
                total,
                output_dir,
                max_workers,
            } => {
                info!(
                    "Starting parallel compression of {} videos ({} at a time) into {}",
                    style(total).bold(),
                    max_workers,
                    output_dir.display()
                );
                self.start_bar(*total);
            }

            Event::JobStarted { relative_path, .. } => self.print(|| {
                info!(
                    "  {} Started compressing: {}",
                    styling::PROCESSING_SYMBOL,
                    relative_path.display()
                )
            }),

            Event::JobCompleted {
                outcome,
                completed,
                total,
            } => {
                self.print(|| Self::report_outcome(outcome, *completed, *total));
                self.advance_bar(outcome);
            }

            Event::BatchComplete { summary } => {
                self.finish_bar();
                print_summary(summary);
            }
        }
    }
}
