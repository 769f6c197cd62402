//! Outcome accounting and the batch summary.
//!
//! Workers never touch the counters. Every outcome travels over a channel to
//! the thread driving the batch, where a single [`BatchAggregator`] records
//! it and emits the progress event.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::CoreError;
use crate::events::{Event, EventDispatcher};

/// Whole-batch lifecycle.
///
/// `Dispatching` and `Aggregating` overlap in time: outcomes are aggregated
/// while later jobs are still queued. `Aggregating` is entered when the first
/// outcome arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    Idle,
    Discovering,
    Dispatching,
    Aggregating,
    Done,
}

/// Why a job failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InputMissing,
    ToolLaunch,
    ToolExecution,
    WorkerPanic,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&CoreError> for JobFailure {
    fn from(err: &CoreError) -> Self {
        let kind = match err {
            CoreError::InputMissing(_) => FailureKind::InputMissing,
            CoreError::ToolLaunch { .. } => FailureKind::ToolLaunch,
            CoreError::ToolExecution { .. } => FailureKind::ToolExecution,
            CoreError::WorkerPanic { .. } => FailureKind::WorkerPanic,
            _ => FailureKind::Io,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

/// Result of running one job. Produced once by the worker that ran it.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub job_id: usize,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub relative_path: PathBuf,
    pub elapsed: Duration,
    pub failure: Option<JobFailure>,
}

impl JobOutcome {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// A failed job as listed in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedJob {
    pub relative_path: PathBuf,
    pub failure: JobFailure,
}

/// Final accounting for a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_elapsed: Duration,
    /// Failed jobs in completion order
    pub failures: Vec<FailedJob>,
}

impl BatchSummary {
    /// Summary of a batch that found nothing to process.
    pub fn empty(total_elapsed: Duration) -> Self {
        Self {
            total: 0,
            succeeded: 0,
            failed: 0,
            total_elapsed,
            failures: Vec::new(),
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// Sequential accumulator for job outcomes.
pub struct BatchAggregator<'a> {
    total: usize,
    completed: usize,
    succeeded: usize,
    failures: Vec<FailedJob>,
    started_at: Instant,
    events: &'a EventDispatcher,
}

impl<'a> BatchAggregator<'a> {
    /// Starts the batch clock.
    pub fn new(total: usize, events: &'a EventDispatcher) -> Self {
        Self {
            total,
            completed: 0,
            succeeded: 0,
            failures: Vec::new(),
            started_at: Instant::now(),
            events,
        }
    }

    /// Counts one outcome and emits `JobCompleted` with the running totals.
    pub fn record(&mut self, outcome: JobOutcome) {
        self.completed += 1;
        match &outcome.failure {
            None => self.succeeded += 1,
            Some(failure) => self.failures.push(FailedJob {
                relative_path: outcome.relative_path.clone(),
                failure: failure.clone(),
            }),
        }

        self.events.emit(Event::JobCompleted {
            completed: self.completed,
            total: self.total,
            outcome,
        });
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    /// Freezes the counters and emits `BatchComplete`.
    pub fn finish(self) -> BatchSummary {
        let summary = BatchSummary {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failures.len(),
            total_elapsed: self.started_at.elapsed(),
            failures: self.failures,
        };
        self.events.emit(Event::BatchComplete {
            summary: summary.clone(),
        });
        summary
    }
}
